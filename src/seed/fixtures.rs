//! Fixed sample content used by the seeder.

/// (first name, last name, email, phone)
pub type Person = (&'static str, &'static str, &'static str, &'static str);

pub const ADMIN: Person = ("Admin", "User", "admin@travelapp.com", "+1234567890");
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_PASSWORD: &str = "password123";

pub const HOSTS: [Person; 5] = [
    ("John", "Smith", "john.smith@email.com", "+1111111111"),
    ("Sarah", "Johnson", "sarah.johnson@email.com", "+2222222222"),
    ("Mike", "Wilson", "mike.wilson@email.com", "+3333333333"),
    ("Emma", "Brown", "emma.brown@email.com", "+4444444444"),
    ("David", "Davis", "david.davis@email.com", "+5555555555"),
];

pub const GUESTS: [Person; 8] = [
    ("Alice", "Williams", "alice.williams@email.com", "+6666666666"),
    ("Bob", "Miller", "bob.miller@email.com", "+7777777777"),
    ("Carol", "Taylor", "carol.taylor@email.com", "+8888888888"),
    ("Daniel", "Anderson", "daniel.anderson@email.com", "+9999999999"),
    ("Eva", "Thomas", "eva.thomas@email.com", "+1010101010"),
    ("Frank", "Jackson", "frank.jackson@email.com", "+1212121212"),
    ("Grace", "White", "grace.white@email.com", "+1313131313"),
    ("Henry", "Harris", "henry.harris@email.com", "+1414141414"),
];

/// (name, description, location, price per night in cents)
pub const PROPERTIES: [(&str, &str, &str, i64); 10] = [
    (
        "Cozy Beach House",
        "A beautiful beachfront property with stunning ocean views",
        "Miami, FL",
        15_000,
    ),
    (
        "Mountain Cabin Retreat",
        "Peaceful cabin nestled in the mountains with hiking trails nearby",
        "Aspen, CO",
        20_000,
    ),
    (
        "Urban Loft",
        "Modern loft in the heart of downtown with city skyline views",
        "New York, NY",
        18_000,
    ),
    (
        "Historic Townhouse",
        "Charming historic townhouse with original architectural details",
        "Boston, MA",
        22_000,
    ),
    (
        "Lakefront Villa",
        "Luxurious villa on the lake with private dock and boat access",
        "Lake Tahoe, CA",
        35_000,
    ),
    (
        "Desert Oasis",
        "Unique desert property with swimming pool and cactus garden",
        "Phoenix, AZ",
        12_000,
    ),
    (
        "Countryside Farmhouse",
        "Rustic farmhouse surrounded by rolling hills and farmland",
        "Napa Valley, CA",
        16_000,
    ),
    (
        "Tropical Paradise",
        "Beachside bungalow with palm trees and tropical gardens",
        "Hawaii, HI",
        28_000,
    ),
    (
        "Ski Lodge",
        "Cozy lodge near ski slopes with fireplace and hot tub",
        "Park City, UT",
        25_000,
    ),
    (
        "Wine Country Estate",
        "Elegant estate in wine country with vineyard views",
        "Sonoma, CA",
        40_000,
    ),
];

/// (title, description, price in cents)
pub const LISTINGS: [(&str, &str, i64); 5] = [
    (
        "Vacation Rental Package",
        "Complete vacation rental with all amenities included",
        29_999,
    ),
    (
        "Weekend Getaway Deal",
        "Perfect weekend escape with special pricing",
        19_999,
    ),
    (
        "Luxury Stay Experience",
        "Premium accommodation with concierge services",
        59_999,
    ),
    (
        "Budget-Friendly Option",
        "Affordable accommodation for budget-conscious travelers",
        8_999,
    ),
    (
        "Family Package Deal",
        "Family-friendly accommodation with extra space",
        34_999,
    ),
];

pub const REVIEW_COMMENTS: [&str; 10] = [
    "Excellent property with amazing views!",
    "Perfect location and very clean accommodations.",
    "Great host, very responsive and helpful.",
    "Beautiful property, would definitely stay again.",
    "Good value for money, comfortable stay.",
    "Outstanding experience, highly recommended!",
    "Nice property but could use some improvements.",
    "Fantastic location, walking distance to everything.",
    "Clean and well-maintained, great amenities.",
    "Wonderful host, made our stay memorable.",
];

pub const GUEST_MESSAGES: [&str; 10] = [
    "Hi! I am interested in booking your property. Is it available for the dates I selected?",
    "Thank you for the quick response! I would like to proceed with the booking.",
    "Could you provide more information about the amenities and nearby attractions?",
    "Perfect! I have made the payment. Looking forward to our stay.",
    "Thank you for hosting us! We had a wonderful time and would love to come back.",
    "Is there a late check-in option available? Our flight arrives late in the evening.",
    "The property was exactly as described. Thank you for the great experience!",
    "Could you recommend some good restaurants in the area?",
    "We will be arriving around 3 PM. Is early check-in possible?",
    "Thank you for being such a wonderful host. The property exceeded our expectations!",
];

pub const HOST_REPLY_PREFIX: &str = "Thank you for your message!";

pub const HOST_REPLY_CLOSINGS: [&str; 3] = [
    "I will get back to you soon.",
    "The property is available.",
    "Looking forward to hosting you!",
];

/// `john.smith` style login name.
pub fn username(first_name: &str, last_name: &str) -> String {
    format!("{}.{}", first_name.to_lowercase(), last_name.to_lowercase())
}
