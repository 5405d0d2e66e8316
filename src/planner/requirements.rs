use crate::models::{DailyRequirements, DietPurpose, Sex, UserProfile};

/// kcal added to TDEE for each purpose. Normal eating sits below maintenance.
const NORMAL_CALORIE_DELTA: f64 = -400.0;
const DIET_CALORIE_DELTA: f64 = 0.0;
const BULK_CALORIE_DELTA: f64 = 400.0;

/// Share of calories that should come from fat.
const FAT_CALORIE_SHARE: f64 = 0.25;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Basal metabolic rate (Mifflin-St Jeor).
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age as f64;
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Total daily energy expenditure.
pub fn total_daily_energy(profile: &UserProfile) -> f64 {
    basal_metabolic_rate(profile) * profile.activity.factor()
}

/// Daily calorie and macro needs for a profile.
///
/// Protein is set per kg of body weight, fat takes a fixed share of
/// calories, and carbs fill what remains.
pub fn calculate_requirements(profile: &UserProfile) -> DailyRequirements {
    let tdee = total_daily_energy(profile);

    let (calories, protein_per_kg) = match profile.purpose {
        DietPurpose::Normal => (tdee + NORMAL_CALORIE_DELTA, 1.6),
        DietPurpose::Diet => (tdee + DIET_CALORIE_DELTA, 1.9),
        DietPurpose::Bulk => (tdee + BULK_CALORIE_DELTA, 1.8),
    };
    let calories = calories.max(0.0);

    let protein = protein_per_kg * profile.weight_kg;
    let fat = calories * FAT_CALORIE_SHARE / KCAL_PER_G_FAT;
    let carbs =
        ((calories - protein * KCAL_PER_G_PROTEIN - fat * KCAL_PER_G_FAT) / KCAL_PER_G_CARBS).max(0.0);

    DailyRequirements {
        calories,
        carbs,
        protein,
        fat,
    }
}
