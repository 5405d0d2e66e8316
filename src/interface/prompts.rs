use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{MealError, Result};
use crate::models::{ActivityLevel, DietPurpose, Sex, UserProfile};

/// Most preferences a profile keeps.
const MAX_PREFERENCES: usize = 3;

/// Minimum Jaro-Winkler similarity for a fuzzy category match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Prompt for a number and parse it.
fn prompt_number<T: FromStr>(prompt: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| MealError::InvalidInput(format!("'{}' is not a valid number", input.trim())))
}

pub fn prompt_height() -> Result<f64> {
    prompt_number("Height (cm)", "170")
}

pub fn prompt_weight() -> Result<f64> {
    prompt_number("Weight (kg)", "65")
}

pub fn prompt_age() -> Result<u32> {
    prompt_number("Age", "30")
}

pub fn prompt_sex() -> Result<Sex> {
    let selection = Select::new()
        .with_prompt("Sex")
        .items(&["Male", "Female"])
        .default(0)
        .interact()?;

    Ok(if selection == 0 { Sex::Male } else { Sex::Female })
}

pub fn prompt_purpose() -> Result<DietPurpose> {
    let selection = Select::new()
        .with_prompt("What are you eating for?")
        .items(&["Normal (maintain weight)", "Diet (lose weight)", "Bulk (gain weight)"])
        .default(0)
        .interact()?;

    Ok(match selection {
        1 => DietPurpose::Diet,
        2 => DietPurpose::Bulk,
        _ => DietPurpose::Normal,
    })
}

pub fn prompt_activity() -> Result<ActivityLevel> {
    let options: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(2)
        .interact()?;

    Ok(ActivityLevel::ALL
        .get(selection)
        .copied()
        .unwrap_or(ActivityLevel::Moderate))
}

/// Categories ranked by similarity to `input`, best first, above the
/// fuzzy threshold.
pub fn fuzzy_categories<'c>(categories: &'c [String], input: &str) -> Vec<&'c str> {
    let needle = input.to_lowercase();
    let mut candidates: Vec<(&str, f64)> = categories
        .iter()
        .map(|c| (c.as_str(), jaro_winkler(&c.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(c, _)| c).collect()
}

/// Prompt for ranked category preferences with fuzzy matching.
pub fn prompt_preferences(categories: &[String]) -> Result<Vec<String>> {
    let mut preferences: Vec<String> = Vec::new();

    while preferences.len() < MAX_PREFERENCES {
        let input: String = Input::new()
            .with_prompt(format!(
                "Preferred category #{} (or press Enter to finish)",
                preferences.len() + 1
            ))
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        // Exact match first (case-insensitive)
        if let Some(category) = categories.iter().find(|c| c.eq_ignore_ascii_case(input)) {
            if !preferences.contains(category) {
                preferences.push(category.clone());
                println!("Added: {}", category);
            }
            continue;
        }

        let candidates = fuzzy_categories(categories, input);
        let picked = match candidates.as_slice() {
            [] => {
                println!("No matching category found for '{}'", input);
                None
            }
            [only] => Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", only))
                .default(true)
                .interact()?
                .then_some(*only),
            many => {
                let mut options: Vec<&str> = many.iter().take(5).copied().collect();
                options.push("None of these");

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&options)
                    .default(0)
                    .interact()?;
                (selection + 1 < options.len()).then(|| options[selection])
            }
        };

        if let Some(category) = picked {
            if !preferences.iter().any(|p| p == category) {
                preferences.push(category.to_string());
                println!("Added: {}", category);
            }
        }
    }

    Ok(preferences)
}

/// Collect a full, validated profile interactively.
pub fn prompt_profile(categories: &[String]) -> Result<UserProfile> {
    let profile = UserProfile {
        height_cm: prompt_height()?,
        weight_kg: prompt_weight()?,
        age: prompt_age()?,
        sex: prompt_sex()?,
        purpose: prompt_purpose()?,
        activity: prompt_activity()?,
        preferences: prompt_preferences(categories)?,
    };
    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_categories_ranks_closest_first() {
        let categories: Vec<String> = ["Grilled", "Steamed", "Rice", "Bread"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let matches = fuzzy_categories(&categories, "griled");
        assert_eq!(matches.first(), Some(&"Grilled"));
        assert!(fuzzy_categories(&categories, "zzzz").is_empty());
    }
}
