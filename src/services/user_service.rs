use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::users::{CreateUserRequest, UpdateUserRequest},
    entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::User,
    routes::params::UserFilter,
    services::{cascade, existing, now, paginate},
    state::AppState,
    validation,
};

pub async fn create_user(state: &AppState, payload: CreateUserRequest) -> AppResult<User> {
    let CreateUserRequest {
        username,
        email,
        password,
        phone_number,
        role,
        first_name,
        last_name,
        is_superuser,
    } = payload;

    validation::short_text("username", &username, 150)?;
    validation::email("email", &email)?;
    validation::max_len("phone_number", &phone_number, 15)?;
    validation::max_len("first_name", &first_name, 150)?;
    validation::max_len("last_name", &last_name, 150)?;
    validation::non_empty("password", &password)?;

    ensure_email_free(state, &email, None).await?;
    let username_taken = Users::find()
        .filter(Column::Username.eq(username.as_str()))
        .count(&state.orm)
        .await?
        > 0;
    if username_taken {
        return Err(AppError::validation("username", "already taken"));
    }

    let password_hash = hash_password(&password)?;

    let user = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        email: Set(email),
        phone_number: Set(phone_number),
        role: Set(role),
        first_name: Set(first_name),
        last_name: Set(last_name),
        password_hash: Set(password_hash),
        is_superuser: Set(is_superuser),
        created_at: Set(now()),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(user_id = %user.id, role = %user.role, "user created");
    Ok(user_from_entity(user))
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<User> {
    existing::<Users>(&state.orm, id)
        .await
        .map(user_from_entity)
}

pub async fn find_user_by_email(state: &AppState, email: &str) -> AppResult<Option<User>> {
    let user = Users::find()
        .filter(Column::Email.eq(email))
        .one(&state.orm)
        .await?
        .map(user_from_entity);
    Ok(user)
}

pub async fn list_users(state: &AppState, filter: &UserFilter) -> AppResult<Vec<User>> {
    let finder = Users::find()
        .filter(user_condition(filter))
        .order_by_asc(Column::CreatedAt);
    let users = paginate(finder, &filter.pagination)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();
    Ok(users)
}

pub async fn count_users(state: &AppState, filter: &UserFilter) -> AppResult<u64> {
    let total = Users::find()
        .filter(user_condition(filter))
        .count(&state.orm)
        .await?;
    Ok(total)
}

pub async fn update_user(
    state: &AppState,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<User> {
    let current = existing::<Users>(&state.orm, id).await?;

    let mut active: ActiveModel = current.into();
    if let Some(email) = payload.email {
        validation::email("email", &email)?;
        ensure_email_free(state, &email, Some(id)).await?;
        active.email = Set(email);
    }
    if let Some(phone_number) = payload.phone_number {
        validation::max_len("phone_number", &phone_number, 15)?;
        active.phone_number = Set(phone_number);
    }
    if let Some(first_name) = payload.first_name {
        validation::max_len("first_name", &first_name, 150)?;
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        validation::max_len("last_name", &last_name, 150)?;
        active.last_name = Set(last_name);
    }
    if let Some(password) = payload.password {
        validation::non_empty("password", &password)?;
        active.password_hash = Set(hash_password(&password)?);
    }

    let user = active.update(&state.orm).await?;
    Ok(user_from_entity(user))
}

/// Deletes the user together with every row that references it.
pub async fn delete_user(state: &AppState, id: Uuid) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    if Users::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let removed = cascade::purge_user(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(
        user_id = %id,
        properties = removed.properties,
        bookings = removed.bookings,
        reviews = removed.reviews,
        payments = removed.payments,
        messages = removed.messages,
        "user deleted"
    );
    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

async fn ensure_email_free(state: &AppState, email: &str, except: Option<Uuid>) -> AppResult<()> {
    let mut condition = Condition::all().add(Column::Email.eq(email));
    if let Some(id) = except {
        condition = condition.add(Column::Id.ne(id));
    }
    if Users::find().filter(condition).count(&state.orm).await? > 0 {
        return Err(AppError::validation("email", "already taken"));
    }
    Ok(())
}

fn user_condition(filter: &UserFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(role) = filter.role {
        condition = condition.add(Column::Role.eq(role));
    }
    if let Some(email) = filter.email.as_ref().filter(|e| !e.is_empty()) {
        condition = condition.add(Column::Email.eq(email.clone()));
    }
    condition
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        phone_number: model.phone_number,
        role: model.role,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        is_superuser: model.is_superuser,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
