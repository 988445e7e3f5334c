//! Meal and Training Plans
//!
//! Static reference plans shown next to the targets: a four-meal day built
//! from Indian staples and a 7-day split with gym and home variants.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Equipment available for the training week
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    /// Commercial gym
    #[default]
    Gym,
    /// Home or minimalist setup
    Home,
}

impl FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', '/'], " ");
        match normalized.as_str() {
            "gym" | "commercial gym" => Ok(Equipment::Gym),
            "home" | "minimalist" | "home minimalist" => Ok(Equipment::Home),
            _ => Err(format!("unknown equipment: {}", s.trim())),
        }
    }
}

impl std::fmt::Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Equipment::Gym => write!(f, "Commercial Gym"),
            Equipment::Home => write!(f, "Home/Minimalist"),
        }
    }
}

/// One meal slot in the day plan
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Meal {
    pub slot: &'static str,
    pub description: &'static str,
}

const MEALS: [Meal; 4] = [
    Meal {
        slot: "Breakfast",
        description: "100g Paneer/Chicken + 2 Rotis + Curd",
    },
    Meal {
        slot: "Lunch",
        description: "1.5 cup Dal + 1 cup Brown Rice + Large Salad",
    },
    Meal {
        slot: "Snack",
        description: "Soya Chunks (50g) + 1 Fruit",
    },
    Meal {
        slot: "Dinner",
        description: "Grilled Fish/Dal Chilla + Stir-fry Veggies",
    },
];

/// The daily meal plan, in eating order
pub fn meal_plan() -> &'static [Meal] {
    &MEALS
}

/// One day of the training week
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TrainingDay {
    pub day: &'static str,
    pub focus: &'static str,
    pub exercises: &'static str,
}

/// (day, focus, gym exercises, home exercises)
const WEEK: [(&str, &str, &str, &str); 7] = [
    ("Mon", "Push", "Bench Press, Military Press", "Diamond Pushups"),
    ("Tue", "Pull", "Deadlifts, Rows", "Inverted Rows"),
    ("Wed", "Legs", "Squats, Leg Press", "Split Squats"),
    ("Thu", "Rest", "Mobility", "Yoga"),
    ("Fri", "Upper", "Incline DB, Pullups", "Regular Pushups"),
    ("Sat", "HIIT", "Sprints", "Burpees"),
    ("Sun", "Rest", "Recovery", "Recovery"),
];

/// Seven-day protocol, Monday first, with exercises for the equipment
pub fn training_week(equipment: Equipment) -> Vec<TrainingDay> {
    WEEK.iter()
        .map(|&(day, focus, gym, home)| TrainingDay {
            day,
            focus,
            exercises: match equipment {
                Equipment::Gym => gym,
                Equipment::Home => home,
            },
        })
        .collect()
}
