pub const ANALYSIS_SYSTEM: &str = include_str!("../data/prompts/analysis_system.txt");
pub const ANALYSIS_USER: &str = include_str!("../data/prompts/analysis_user.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!ANALYSIS_SYSTEM.is_empty());
        assert!(!ANALYSIS_USER.is_empty());
    }

    #[test]
    fn test_system_prompt_names_both_keys() {
        assert!(ANALYSIS_SYSTEM.contains("\"food_name\""));
        assert!(ANALYSIS_SYSTEM.contains("\"calories\""));
    }
}
