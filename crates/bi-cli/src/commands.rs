//! Subcommand implementations

use std::fs;

use anyhow::{Context, Result};
use tracing::debug;

use bi_controls::{
    validate_rules, ColumnOption, FormattingRuleConfig, FormattingRuleEditor, RuleEditorProps,
};
use bi_core::config::AppConfig;
use bi_core::{BiError, OneOrMany, VerboseMap};
use bi_queries::{gantt, FormData};

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

fn read_rules(path: &str) -> Result<Vec<FormattingRuleConfig>> {
    let rules: OneOrMany<FormattingRuleConfig> = serde_json::from_str(&read(path)?)
        .map_err(BiError::from)
        .with_context(|| format!("Invalid formatting rules in {}", path))?;
    let rules = rules.into_vec();

    validate_rules(&rules)
        .map_err(BiError::from)
        .with_context(|| format!("Invalid formatting rules in {}", path))?;
    Ok(rules)
}

pub fn gantt_query(path: &str, pretty: bool, config: &AppConfig) -> Result<()> {
    let form_data = FormData::from_json(&read(path)?)
        .map_err(BiError::from)
        .with_context(|| format!("Invalid form data in {}", path))?;

    let context = gantt::build_query(&form_data, &config.query).map_err(BiError::from)?;
    debug!(queries = context.queries.len(), "Gantt query built");

    let output = if pretty {
        serde_json::to_string_pretty(&context)?
    } else {
        serde_json::to_string(&context)?
    };
    println!("{}", output);
    Ok(())
}

pub fn label(path: &str, verbose_map: Option<&str>) -> Result<()> {
    let verbose_map: Option<VerboseMap> = match verbose_map {
        Some(map_path) => Some(
            serde_json::from_str(&read(map_path)?)
                .with_context(|| format!("Invalid verbose map in {}", map_path))?,
        ),
        None => None,
    };

    let editor = FormattingRuleEditor::new(
        RuleEditorProps {
            value: Some(read_rules(path)?),
            verbose_map,
            ..Default::default()
        },
        None,
    );

    for label in editor.labels() {
        println!("{}", label);
    }
    Ok(())
}

pub fn apply_columns(path: &str, columns: Vec<String>, remove_irrelevant: bool) -> Result<()> {
    let rules = read_rules(path)?;
    let current: Vec<ColumnOption> = rules
        .iter()
        .map(|rule| ColumnOption::new(rule.column.clone()))
        .collect();

    let mut editor = FormattingRuleEditor::new(
        RuleEditorProps {
            value: Some(rules),
            column_options: current,
            remove_irrelevant_conditions: remove_irrelevant,
            ..Default::default()
        },
        None,
    );
    editor.set_column_options(columns.into_iter().map(ColumnOption::new).collect());

    println!("{}", serde_json::to_string_pretty(editor.rules())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bi-cli-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_rules_accepts_single_rule() {
        let path = write_temp("single.json", r#"{"column": "x", "operator": "None"}"#);
        let rules = read_rules(path.to_str().unwrap()).unwrap();
        assert_eq!(rules, vec![FormattingRuleConfig::column_only("x")]);
    }

    #[test]
    fn test_gantt_query_reports_bad_order_by() {
        let path = write_temp(
            "gantt.json",
            r#"{"datasource": "1__table", "viz_type": "gantt_chart", "order_by_cols": ["oops"]}"#,
        );
        let err = gantt_query(path.to_str().unwrap(), false, &AppConfig::default()).unwrap_err();
        let bi_error = err.downcast_ref::<BiError>().unwrap();
        assert_eq!(bi_error.error_code(), "parse_error");
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let path = write_temp(
            "invalid.json",
            r#"[{"column": "x", "operator": "None"}, {"column": "y", "operator": ">"}]"#,
        );
        let err = apply_columns(path.to_str().unwrap(), vec!["x".into()], true).unwrap_err();
        let bi_error = err.downcast_ref::<BiError>().unwrap();
        assert_eq!(bi_error.error_code(), "validation_failed");
        match bi_error {
            BiError::Validation(errors) => assert!(errors.has_error("rules[1].target_value")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_columns_keeps_integer_operands() {
        let path = write_temp(
            "integers.json",
            r#"[{"column": "y", "operator": ">", "targetValue": 5}]"#,
        );
        let rules = read_rules(path.to_str().unwrap()).unwrap();
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            serde_json::json!([{"column": "y", "operator": ">", "targetValue": 5}])
        );
        assert!(apply_columns(path.to_str().unwrap(), vec!["y".into()], true).is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(label("/nonexistent/rules.json", None).is_err());
    }
}
