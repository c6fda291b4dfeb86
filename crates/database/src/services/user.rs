use crate::{
    entities::users,
    error::{CatalogError, unique_violation_as},
};
use chrono::Utc;
use log::info;
use models::role::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    prelude::Expr,
};
use uuid::Uuid;

/// Directory of registered users and their wallets
pub struct UserService;

impl UserService {
    /// Registers a new user with an empty wallet
    pub async fn register<C: ConnectionTrait>(
        db: &C,
        email: &str,
        name: &str,
        role: Role,
    ) -> Result<users::Model, CatalogError> {
        let duplicate = || CatalogError::Conflict("A user with the same email already exists.".into());

        if Self::find_by_email(db, email).await?.is_some() {
            return Err(duplicate());
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_owned()),
            name: Set(name.to_owned()),
            role: Set(role),
            wallet: Set(0),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(|e| unique_violation_as(e, duplicate()))?;

        info!("Registered user {} as {}", user.id, user.role);
        Ok(user)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<users::Model>, CatalogError> {
        Ok(users::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<users::Model>, CatalogError> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?)
    }

    /// Like [`Self::find_by_id`], but a missing user is an error
    pub async fn get_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<users::Model, CatalogError> {
        Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("User not found.".into()))
    }

    /// Adds `amount` to the user's wallet balance
    ///
    /// The increment happens in the database so concurrent credits are not lost.
    pub async fn credit_wallet<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        amount: i64,
    ) -> Result<users::Model, CatalogError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Wallet,
                Expr::col(users::Column::Wallet).add(amount),
            )
            .filter(users::Column::Id.eq(id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound("User not found.".into()));
        }

        let user = Self::get_by_id(db, id).await?;
        info!("Credited {amount} to wallet of user {id}, balance {}", user.wallet);

        Ok(user)
    }
}
