//! Account visibility derived from a user's email and role.
//!
//! Entitlements are recomputed from the live user record on every request and never
//! persisted, so a role or email change applies immediately.

use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, Condition};

use crate::{
    model::user::{ModelTag, UserRole},
    server::{
        error::Error,
        model::db::{AccountModel, UserModel},
    },
};

/// Model tags a user is entitled to see accounts for
///
/// - email domain `gmail.com` grants `Dillion`
/// - email domain `hotmail.*`, `live.*` or `outlook.*` grants `katie`
/// - the `ADMIN` role grants every tag regardless of email
///
/// Domains are compared case-insensitively.
pub fn compute_model_entitlements(email: &str, role: UserRole) -> BTreeSet<ModelTag> {
    if role == UserRole::Admin {
        return ModelTag::ALL.iter().copied().collect();
    }

    let mut models = BTreeSet::new();

    let Some((_, domain)) = email.rsplit_once('@') else {
        return models;
    };
    let domain = domain.to_ascii_lowercase();

    if domain == "gmail.com" {
        models.insert(ModelTag::Dillion);
    }
    if ["hotmail.", "live.", "outlook."]
        .iter()
        .any(|prefix| domain.starts_with(prefix))
    {
        models.insert(ModelTag::Katie);
    }

    models
}

/// Predicate selecting the accounts a user may see and manage
///
/// An account is visible if the user owns it or its model tag is one the user is
/// entitled to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityFilter {
    user_id: i32,
    models: BTreeSet<ModelTag>,
}

impl VisibilityFilter {
    pub fn new(user_id: i32, models: BTreeSet<ModelTag>) -> Self {
        Self { user_id, models }
    }

    /// Builds the filter from a stored user, failing only if the stored role is unknown
    pub fn for_user(user: &UserModel) -> Result<Self, Error> {
        let role: UserRole = user.role.parse()?;

        Ok(Self::new(
            user.id,
            compute_model_entitlements(&user.email, role),
        ))
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn models(&self) -> &BTreeSet<ModelTag> {
        &self.models
    }

    pub fn matches(&self, account: &AccountModel) -> bool {
        if account.owner_id == Some(self.user_id) {
            return true;
        }

        account
            .model
            .as_deref()
            .and_then(|model| model.parse::<ModelTag>().ok())
            .is_some_and(|model| self.models.contains(&model))
    }

    /// The same predicate as [`Self::matches`] expressed as a query condition
    pub fn condition(&self) -> Condition {
        let mut condition =
            Condition::any().add(entity::account::Column::OwnerId.eq(self.user_id));

        if !self.models.is_empty() {
            condition = condition.add(
                entity::account::Column::Model
                    .is_in(self.models.iter().map(|model| model.as_str())),
            );
        }

        condition
    }
}
