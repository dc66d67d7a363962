//! Resident registration and login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::resident::ResidentRepository,
    error::{auth::AuthError, Error},
    model::auth::issue_token,
};

pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a resident. The login must not already be taken.
    pub async fn register(
        &self,
        login: String,
        password: &str,
    ) -> Result<entity::resident::Model, Error> {
        let repo = ResidentRepository::new(self.db);

        if repo.get_by_login(&login).await?.is_some() {
            return Err(Error::InvalidRequest(format!(
                "login '{}' is already taken",
                login
            )));
        }

        let password_hash = hash_password(password)?;

        repo.create(login, password_hash).await.map_err(Error::from)
    }

    /// Verifies credentials and issues a signed token.
    ///
    /// Unknown login and wrong password collapse into the same error so the
    /// response does not leak which logins exist.
    pub async fn login(&self, login: &str, password: &str, secret: &str) -> Result<String, Error> {
        let resident = ResidentRepository::new(self.db)
            .get_by_login(login)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &resident.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(issue_token(resident.id, secret)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password, AuthService};
    use crate::server::{
        error::{auth::AuthError, Error},
        model::auth::verify_token,
        util::test::setup_db,
    };

    static SECRET: &str = "test-secret";

    #[test]
    fn password_round_trips_through_hash() -> Result<(), Error> {
        let hash = hash_password("hunter2")?;

        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash)?);
        assert!(!verify_password("hunter3", &hash)?);

        Ok(())
    }

    #[tokio::test]
    async fn register_then_login_issues_valid_token() -> Result<(), Error> {
        let db = setup_db().await?;
        let service = AuthService::new(&db);

        let resident = service.register("alice".to_string(), "hunter2").await?;

        let token = service.login("alice", "hunter2", SECRET).await?;
        let claims = verify_token(&token, SECRET)?;
        assert_eq!(claims.sub, resident.id);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_login_is_rejected() -> Result<(), Error> {
        let db = setup_db().await?;
        let service = AuthService::new(&db);

        service.register("alice".to_string(), "hunter2").await?;

        let result = service.register("alice".to_string(), "other").await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_login_fail_identically() -> Result<(), Error> {
        let db = setup_db().await?;
        let service = AuthService::new(&db);

        service.register("alice".to_string(), "hunter2").await?;

        let wrong_password = service.login("alice", "nope", SECRET).await;
        let unknown_login = service.login("mallory", "nope", SECRET).await;

        assert!(matches!(
            wrong_password,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            unknown_login,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }
}
