use sea_orm::DatabaseConnection;

use crate::{
    model::user::{CreateUserDto, UserDto, UserRole},
    server::{
        data::user::UserRepository,
        error::{request::RequestError, Error},
        model::db::UserModel,
        service::{access::compute_model_entitlements, retry::RetryContext},
        util::password::{hash_password, verify_password},
    },
};

/// Minimum accepted password length for new users
pub const MIN_PASSWORD_LENGTH: usize = 8;

impl TryFrom<UserModel> for UserDto {
    type Error = Error;

    fn try_from(user: UserModel) -> Result<Self, Self::Error> {
        let role: UserRole = user.role.parse()?;

        Ok(Self {
            id: user.id,
            models: compute_model_entitlements(&user.email, role)
                .into_iter()
                .collect(),
            email: user.email,
            role,
            created_at: user.created_at,
        })
    }
}

/// Service for portal user accounts and password login
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by ID.
    ///
    /// Uses automatic retry logic to handle transient database failures.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserModel>, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let user = UserRepository::new(&db).get_by_id(user_id).await?;

                Ok(user)
            })
        })
        .await
    }

    /// Creates a user with a hashed password.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The created user
    /// - `Err(Error::RequestError)` - Invalid email, short password or email already taken
    pub async fn create_user(&self, new_user: CreateUserDto) -> Result<UserDto, Error> {
        let email = new_user.email.trim().to_string();

        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid_email {
            return Err(RequestError::Validation("A valid email is required".to_string()).into());
        }
        if new_user.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RequestError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ))
            .into());
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.get_by_email(&email).await?.is_some() {
            return Err(
                RequestError::Conflict("A user with this email already exists".to_string()).into(),
            );
        }

        let password_hash = hash_password(&new_user.password)?;
        let user = user_repo
            .create(&email, password_hash, new_user.role)
            .await?;

        tracing::info!(user_id = user.id, role = %new_user.role, "Created user");

        user.try_into()
    }

    /// Checks an email and password pair.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - Credentials are valid
    /// - `Ok(None)` - Unknown email or wrong password
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserModel>, Error> {
        let Some(user) = UserRepository::new(self.db)
            .get_by_email(email.trim())
            .await?
        else {
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash)? {
            return Ok(None);
        }

        Ok(Some(user))
    }
}
