use monoforge::config::ProjectConfig;
use monoforge::error::Result;
use monoforge::prompt::{complete_config, Prompter};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers questions from a fixed script and records what was asked.
struct ScriptedPrompter {
    answers: RefCell<VecDeque<&'static str>>,
    asked: RefCell<Vec<(String, Option<String>)>>,
}

impl ScriptedPrompter {
    fn new(answers: &[&'static str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.asked
            .borrow_mut()
            .push((prompt.to_string(), default.map(str::to_string)));
        let answer = self.answers.borrow_mut().pop_front().unwrap_or_default();
        Ok(match (answer, default) {
            ("", Some(default)) => default.to_string(),
            (answer, _) => answer.to_string(),
        })
    }
}

#[test]
fn test_prompts_for_missing_values() {
    let prompter = ScriptedPrompter::new(&["coffee-shop", "", "com.beans"]);
    let mut config = ProjectConfig { interactive: true, ..ProjectConfig::default() };

    complete_config(&prompter, &mut config).unwrap();

    assert_eq!(config.project_name, "coffee-shop");
    assert_eq!(config.app_display_name.as_deref(), Some("Coffee Shop"));
    assert_eq!(config.org_domain.as_deref(), Some("com.beans"));

    let asked = prompter.asked.borrow();
    assert_eq!(asked.len(), 3);
    assert_eq!(asked[1].1.as_deref(), Some("Coffee Shop"));
    assert_eq!(asked[2].1.as_deref(), Some("com.coffeeshop"));
}

#[test]
fn test_supplied_values_are_not_asked() {
    let prompter = ScriptedPrompter::new(&[]);
    let mut config = ProjectConfig {
        project_name: "shop".to_string(),
        app_display_name: Some("Shop".to_string()),
        org_domain: Some("com.acme".to_string()),
        interactive: true,
        ..ProjectConfig::default()
    };

    complete_config(&prompter, &mut config).unwrap();

    assert!(prompter.asked.borrow().is_empty());
}

#[test]
fn test_non_interactive_never_prompts() {
    let prompter = ScriptedPrompter::new(&["ignored"]);
    let mut config = ProjectConfig::default();

    complete_config(&prompter, &mut config).unwrap();

    assert!(prompter.asked.borrow().is_empty());
    assert!(config.project_name.is_empty());
}
