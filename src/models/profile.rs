use serde::{Deserialize, Serialize};

use crate::error::{MealError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// What the user is eating for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietPurpose {
    Normal,
    Diet,
    Bulk,
}

/// Activity level and its TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    VeryLow,
    Light,
    Moderate,
    High,
    VeryHigh,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::VeryLow,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::High,
        ActivityLevel::VeryHigh,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::VeryLow => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
            ActivityLevel::VeryHigh => 1.9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::VeryLow => "very low (little or no exercise)",
            ActivityLevel::Light => "light (1-3 days/week)",
            ActivityLevel::Moderate => "moderate (4-5 days/week)",
            ActivityLevel::High => "high (6-7 days/week)",
            ActivityLevel::VeryHigh => "very high (physical job or athlete)",
        }
    }
}

/// Body metrics and preferences of the person being planned for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub sex: Sex,
    pub purpose: DietPurpose,
    pub activity: ActivityLevel,

    /// Ranked category labels, most preferred first.
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl UserProfile {
    /// Reject metrics outside plausible human ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.height_cm > 0.0 && self.height_cm < 300.0) {
            return Err(MealError::InvalidProfile(format!(
                "height must be between 0 and 300 cm, got {}",
                self.height_cm
            )));
        }
        if !(self.weight_kg > 0.0 && self.weight_kg < 1000.0) {
            return Err(MealError::InvalidProfile(format!(
                "weight must be between 0 and 1000 kg, got {}",
                self.weight_kg
            )));
        }
        if self.age == 0 || self.age >= 150 {
            return Err(MealError::InvalidProfile(format!(
                "age must be between 1 and 149, got {}",
                self.age
            )));
        }
        Ok(())
    }

    /// Body mass index in kg/m^2.
    pub fn bmi(&self) -> Result<f64> {
        if self.height_cm <= 0.0 {
            return Err(MealError::InvalidProfile(
                "height must be positive".to_string(),
            ));
        }
        let meters = self.height_cm / 100.0;
        Ok(self.weight_kg / (meters * meters))
    }

    /// Top-ranked preferred category, if any.
    pub fn preferred_category(&self) -> Option<&str> {
        self.preferences.first().map(String::as_str)
    }
}

/// Daily energy and macro-nutrient requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRequirements {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            height_cm: 184.0,
            weight_kg: 72.0,
            age: 24,
            sex: Sex::Male,
            purpose: DietPurpose::Normal,
            activity: ActivityLevel::Moderate,
            preferences: vec!["Rice".to_string(), "Grilled".to_string()],
        }
    }

    #[test]
    fn test_bmi() {
        let bmi = sample_profile().bmi().unwrap();
        assert!((bmi - 21.27).abs() < 0.01);
    }

    #[test]
    fn test_validate_rejects_zero_height() {
        let mut profile = sample_profile();
        profile.height_cm = 0.0;
        assert!(profile.validate().is_err());
        assert!(profile.bmi().is_err());
    }

    #[test]
    fn test_preferred_category() {
        let mut profile = sample_profile();
        assert_eq!(profile.preferred_category(), Some("Rice"));

        profile.preferences.clear();
        assert_eq!(profile.preferred_category(), None);
    }

    #[test]
    fn test_profile_json() {
        let json = r#"{
            "height_cm": 165, "weight_kg": 55, "age": 30,
            "sex": "Female", "purpose": "Diet", "activity": "Light"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sex, Sex::Female);
        assert!(profile.preferences.is_empty());
        assert!(profile.validate().is_ok());
    }
}
