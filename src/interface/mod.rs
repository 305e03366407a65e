pub mod prompts;
pub mod render;

pub use prompts::{
    compose_plan, prompt_food, prompt_meal_name, prompt_plan_type, prompt_quantity, prompt_text,
    prompt_yes_no, rank_matches,
};
pub use render::{display_food_list, display_plan_aggregate};
