use serde::{Deserialize, Serialize};

/// User's gender, as collected by the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Man,
    Woman,
}

/// Nutrition goal the plan is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Keep,
    Training,
}

/// Activity profile chosen from the profession catalog. The `value` is the
/// backend identifier, the `label` is what the UI rendered when it was
/// picked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profession {
    pub value: String,
    pub label: String,
}

/// The in-memory user profile.
///
/// Body parameters are carried as strings: they originate from free-form
/// wizard inputs and go back out the same way. Numeric interpretation is
/// the backend's business.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: Option<u64>,
    pub email: String,
    pub name: String,
    pub gender: Option<Gender>,
    pub goal: Option<Goal>,
    pub profession: Option<Profession>,
    pub weight: String,
    pub height: String,
    pub age: String,
}

impl UserProfile {
    /// Builds a profile from the default template with `update` merged on
    /// top. Fields the update does not carry keep their template values.
    pub fn from_update(update: &ProfileUpdate) -> Self {
        let mut profile = UserProfile::default();
        profile.merge(update);
        profile
    }

    /// Patches this profile in place with every field `update` carries.
    /// The profile is never left partially written: absent fields stay
    /// untouched, present fields are replaced whole.
    pub fn merge(&mut self, update: &ProfileUpdate) {
        if let Some(id) = update.id {
            self.id = Some(id);
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(goal) = update.goal {
            self.goal = Some(goal);
        }
        if let Some(profession) = &update.profession {
            self.profession = Some(profession.clone());
        }
        if let Some(weight) = &update.weight {
            self.weight = weight.clone();
        }
        if let Some(height) = &update.height {
            self.height = height.clone();
        }
        if let Some(age) = &update.age {
            self.age = age.clone();
        }
    }
}

/// Partial profile change: a field is applied only when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub id: Option<u64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub goal: Option<Goal>,
    pub profession: Option<Profession>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub age: Option<String>,
}

/// Everything the onboarding wizard collects before registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub gender: Option<Gender>,
    pub goal: Option<Goal>,
    pub profession: Option<Profession>,
    pub weight: String,
    pub height: String,
    pub age: String,
}

impl RegistrationForm {
    /// The profile-shaped part of the form, used to seed the in-memory
    /// profile after a successful registration. Credentials stay behind.
    pub fn as_profile_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            id: None,
            email: Some(self.email.clone()),
            name: Some(self.name.clone()),
            gender: self.gender,
            goal: self.goal,
            profession: self.profession.clone(),
            weight: Some(self.weight.clone()),
            height: Some(self.height.clone()),
            age: Some(self.age.clone()),
        }
    }
}
