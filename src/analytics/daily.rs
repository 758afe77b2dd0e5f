//! Daily energy balance aggregation
//!
//! Joins food and activity totals by calendar day with the BMR series
//! from weigh-ins to produce per-day expenditure and caloric
//! deficit/surplus figures.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::models::{ActivityEntry, FoodEntry, WeighIn};

/// Aggregated totals for one calendar day
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub calories_consumed: i64,
    pub protein_consumed: f64,
    pub carbs_consumed: f64,
    pub fat_consumed: f64,
    pub calories_burned: i64,
    /// Effective BMR for the day. Days without a weigh-in borrow the BMR
    /// from the chronologically latest weigh-in overall; 0 only when no
    /// weigh-in exists at all.
    pub bmr: f64,
    pub total_expenditure: f64,
    pub deficit_surplus: f64,
}

/// Calculate per-day macro totals and caloric deficit/surplus.
///
/// One summary is produced per distinct calendar day appearing in the
/// food or activity data, sorted most recent first. A day with activity
/// but no food has zero consumption; a day with food but no activity has
/// zero calories burned.
pub fn calculate_daily_summary(
    food_entries: &[FoodEntry],
    activity_entries: &[ActivityEntry],
    weigh_ins: &[WeighIn],
) -> Vec<DailySummary> {
    // Sort a working copy of the weigh-ins oldest first; the caller's
    // ordering is left untouched.
    let mut sorted_weigh_ins: Vec<&WeighIn> = weigh_ins.iter().collect();
    sorted_weigh_ins.sort_by(|a, b| a.date_logged.cmp(&b.date_logged));

    // BMR by weigh-in day. Only days with an actual weigh-in get an
    // entry; for duplicate days the later row wins.
    let mut bmr_by_day: HashMap<&str, f64> = HashMap::new();
    for entry in &sorted_weigh_ins {
        bmr_by_day.insert(entry.date_logged.as_str(), entry.bmr_kcal);
    }

    let latest_bmr = sorted_weigh_ins.last().map(|entry| entry.bmr_kcal);

    // The set of days to summarize comes from food and activity data, not
    // from weigh-ins.
    let mut days: BTreeSet<&str> = BTreeSet::new();
    days.extend(food_entries.iter().map(|e| e.date_eaten.as_str()));
    days.extend(activity_entries.iter().map(|e| e.date_logged.as_str()));

    let mut summaries: Vec<DailySummary> = days
        .into_iter()
        .map(|day| {
            let calories_consumed: i64 = food_entries
                .iter()
                .filter(|e| e.date_eaten == day)
                .map(|e| e.calories)
                .sum();
            let protein_consumed: f64 = food_entries
                .iter()
                .filter(|e| e.date_eaten == day)
                .map(|e| e.protein)
                .sum();
            let carbs_consumed: f64 = food_entries
                .iter()
                .filter(|e| e.date_eaten == day)
                .map(|e| e.carbs)
                .sum();
            let fat_consumed: f64 = food_entries
                .iter()
                .filter(|e| e.date_eaten == day)
                .map(|e| e.fat)
                .sum();
            let calories_burned: i64 = activity_entries
                .iter()
                .filter(|e| e.date_logged == day)
                .map(|e| e.calories_burned)
                .sum();

            // Effective BMR: the day's own weigh-in if one exists,
            // otherwise the latest weigh-in overall as an estimate. A
            // weigh-in that recorded a BMR of 0 counts as missing.
            let mut bmr = bmr_by_day.get(day).copied().unwrap_or(0.0);
            if bmr == 0.0 {
                if let Some(latest) = latest_bmr {
                    bmr = latest;
                }
            }

            let total_expenditure = bmr + calories_burned as f64;
            let deficit_surplus = calories_consumed as f64 - total_expenditure;

            DailySummary {
                date: day.to_string(),
                calories_consumed,
                protein_consumed,
                carbs_consumed,
                fat_consumed,
                calories_burned,
                bmr,
                total_expenditure,
                deficit_surplus,
            }
        })
        .collect();

    // Most recent day first
    summaries.sort_by(|a, b| b.date.cmp(&a.date));

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(date: &str, calories: i64, protein: f64, carbs: f64, fat: f64) -> FoodEntry {
        FoodEntry {
            id: 0,
            food_name: "test food".to_string(),
            serving_multiplier: 1.0,
            calories,
            protein,
            carbs,
            fat,
            notes: None,
            date_eaten: date.to_string(),
            created_at: String::new(),
        }
    }

    fn activity(date: &str, calories_burned: i64) -> ActivityEntry {
        ActivityEntry {
            id: 0,
            activity_type: "walk".to_string(),
            duration_minutes: 30.0,
            calories_burned,
            distance_miles: 1.5,
            notes: None,
            date_logged: date.to_string(),
            created_at: String::new(),
        }
    }

    fn weigh_in(date: &str, bmr: f64) -> WeighIn {
        WeighIn {
            id: 0,
            date_logged: date.to_string(),
            weight_lbs: 250.0,
            fat_pct: 0.0,
            bmi: 0.0,
            bmr_kcal: bmr,
            visceral_fat: 0.0,
            muscle_lbs: 0.0,
            bone_mass_lbs: 0.0,
            protein_pct: 0.0,
            water_pct: 0.0,
            skeletal_muscle_lbs: 0.0,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_sums_food_and_activity_per_day() {
        let food_entries = vec![
            food("2025-01-10", 500, 30.0, 40.0, 20.0),
            food("2025-01-10", 300, 10.0, 50.0, 5.0),
            food("2025-01-11", 700, 45.0, 60.0, 25.0),
        ];
        let activity_entries = vec![activity("2025-01-10", 250)];

        let summaries = calculate_daily_summary(&food_entries, &activity_entries, &[]);

        assert_eq!(summaries.len(), 2);
        // Most recent first
        assert_eq!(summaries[0].date, "2025-01-11");
        assert_eq!(summaries[1].date, "2025-01-10");
        assert_eq!(summaries[1].calories_consumed, 800);
        assert_eq!(summaries[1].protein_consumed, 40.0);
        assert_eq!(summaries[1].carbs_consumed, 90.0);
        assert_eq!(summaries[1].fat_consumed, 25.0);
        assert_eq!(summaries[1].calories_burned, 250);
    }

    #[test]
    fn test_deficit_equals_consumed_minus_expenditure() {
        let food_entries = vec![food("2025-01-10", 1800, 100.0, 150.0, 60.0)];
        let activity_entries = vec![activity("2025-01-10", 400)];
        let weigh_ins = vec![weigh_in("2025-01-10", 2100.0)];

        let summaries = calculate_daily_summary(&food_entries, &activity_entries, &weigh_ins);

        for day in &summaries {
            assert_eq!(
                day.deficit_surplus,
                day.calories_consumed as f64 - (day.bmr + day.calories_burned as f64)
            );
        }
        assert_eq!(summaries[0].total_expenditure, 2500.0);
        assert_eq!(summaries[0].deficit_surplus, -700.0);
    }

    #[test]
    fn test_no_weigh_ins_means_zero_bmr() {
        let food_entries = vec![food("2025-01-10", 1800, 0.0, 0.0, 0.0)];

        let summaries = calculate_daily_summary(&food_entries, &[], &[]);

        assert_eq!(summaries[0].bmr, 0.0);
        assert_eq!(summaries[0].total_expenditure, 0.0);
        assert_eq!(summaries[0].deficit_surplus, 1800.0);
    }

    #[test]
    fn test_day_without_weigh_in_uses_latest_bmr_overall() {
        // The fallback takes the latest weigh-in's BMR, not the nearest
        // in time; a day before the first weigh-in also gets it.
        let food_entries = vec![
            food("2025-01-05", 1500, 0.0, 0.0, 0.0),
            food("2025-01-12", 1500, 0.0, 0.0, 0.0),
            food("2025-01-20", 1500, 0.0, 0.0, 0.0),
        ];
        let weigh_ins = vec![
            weigh_in("2025-01-10", 2100.0),
            weigh_in("2025-01-18", 2050.0),
        ];

        let summaries = calculate_daily_summary(&food_entries, &[], &weigh_ins);

        let by_date = |date: &str| summaries.iter().find(|s| s.date == date).unwrap();
        assert_eq!(by_date("2025-01-05").bmr, 2050.0);
        assert_eq!(by_date("2025-01-12").bmr, 2050.0);
        assert_eq!(by_date("2025-01-20").bmr, 2050.0);
    }

    #[test]
    fn test_day_with_own_weigh_in_uses_that_bmr() {
        let food_entries = vec![food("2025-01-10", 1500, 0.0, 0.0, 0.0)];
        let weigh_ins = vec![
            weigh_in("2025-01-10", 2100.0),
            weigh_in("2025-01-18", 2050.0),
        ];

        let summaries = calculate_daily_summary(&food_entries, &[], &weigh_ins);

        assert_eq!(summaries[0].bmr, 2100.0);
    }

    #[test]
    fn test_activity_only_day_has_zero_consumption() {
        let activity_entries = vec![activity("2025-01-10", 300)];

        let summaries = calculate_daily_summary(&[], &activity_entries, &[]);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].calories_consumed, 0);
        assert_eq!(summaries[0].calories_burned, 300);
        assert_eq!(summaries[0].deficit_surplus, -300.0);
    }

    #[test]
    fn test_input_ordering_is_not_mutated() {
        let weigh_ins = vec![
            weigh_in("2025-01-18", 2050.0),
            weigh_in("2025-01-10", 2100.0),
        ];
        let food_entries = vec![food("2025-01-11", 100, 0.0, 0.0, 0.0)];

        calculate_daily_summary(&food_entries, &[], &weigh_ins);

        assert_eq!(weigh_ins[0].date_logged, "2025-01-18");
    }
}
