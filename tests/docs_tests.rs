//! Reference docs integration tests
//!
//! Renders the fixture specification and checks document layout, option
//! tables and the deduplicated global flags section.

use std::collections::BTreeMap;

use cmdgen::{generate_docs, parse_commands, CmdgenError, DocsConfig};
use pretty_assertions::assert_eq;

const FIXTURE: &str = include_str!("fixtures/commands.yaml");

fn render(yaml: &str) -> cmdgen::Result<BTreeMap<String, String>> {
    let commands = parse_commands(yaml.as_bytes()).unwrap();
    let docs = generate_docs(&commands, &DocsConfig::default())?;
    Ok(docs
        .into_iter()
        .map(|(key, bytes)| (key, String::from_utf8(bytes).unwrap()))
        .collect())
}

fn fixture_docs() -> BTreeMap<String, String> {
    render(FIXTURE).unwrap()
}

// =============================================================================
// Document Layout
// =============================================================================

mod layout_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_one_document_per_top_level_command() {
        let docs = fixture_docs();
        let keys: Vec<&str> = docs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["config", "workflow"]);
    }

    #[test]
    fn test_front_matter_and_notice() {
        let docs = fixture_docs();
        let expected = "---\n\
            id: workflow\n\
            title: CLI workflow command reference\n\
            sidebar_label: workflow\n\
            description: Start, cancel and inspect workflows.\n\
            toc_max_heading_level: 4\n\
            keywords:\n  - workflow\n  - start\n  - cancel\n\
            tags:\n  - workflows\n  - cli\n\
            ---\n\n\
            {/* NOTE: This is an auto-generated file. Any edit to this file will be overwritten.\n\
            This file is generated from commands.yaml via cmdgen docs */}\n";
        assert!(docs["workflow"].starts_with(expected), "{}", docs["workflow"]);
    }

    #[test]
    fn test_title_prefix_and_source_from_config() {
        let commands = parse_commands(FIXTURE.as_bytes()).unwrap();
        let config = DocsConfig {
            title_prefix: "Tool".to_string(),
            source: "spec/cli.yaml".to_string(),
            ..DocsConfig::default()
        };
        let docs = generate_docs(&commands, &config).unwrap();
        let config_doc = String::from_utf8(docs["config"].clone()).unwrap();
        assert!(config_doc.contains("title: Tool config command reference\n"));
        assert!(config_doc.contains("This file is generated from spec/cli.yaml via cmdgen docs */}\n"));
        assert!(config_doc.contains("tags:\n---\n"));
    }

    #[test]
    fn test_subcommand_sections_in_declaration_order() {
        let docs = fixture_docs();
        let doc = &docs["workflow"];
        let start = doc.find("## start\n\n").unwrap();
        let cancel = doc.find("## cancel\n\n").unwrap();
        let globals = doc.find("## Global Flags").unwrap();
        assert!(start < cancel && cancel < globals);
        assert!(doc.contains(
            "## start\n\nStart a new workflow. See [the guide](https://example.com/guide).\n\n```\napp workflow start --workflow-id my-id\n```\n\n"
        ));
    }

    #[test]
    fn test_deprecated_section_starts_with_box() {
        let docs = fixture_docs();
        let expected = "## cancel\n\n```\n\
            +--------------------------------------+\n\
            | CAUTION: Use app workflow terminate. |\n\
            +--------------------------------------+\n\
            ```\n\n\
            Request cancellation of a running workflow.\n\n";
        assert!(docs["workflow"].contains(expected));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(fixture_docs(), fixture_docs());
    }
}

// =============================================================================
// Option Tables
// =============================================================================

mod table_tests {
    use super::*;

    #[test]
    fn test_local_table_sorted_by_name() {
        let docs = fixture_docs();
        let expected = "Use the following options to change the behavior of this command.\n\n\
            | Flag | Required | Description |\n\
            |------|----------|-------------|\n\
            | `--execution-timeout` | No | **duration** Execution timeout. |\n\
            | `--input`, `-i` | No | **string[]** Input value as JSON, e.g. `'Key={\"a\": 1}'`. |\n\
            | `--priority` | No | **int** Priority, higher is sooner. |\n\
            | `--run-id`, `-r` | No | **string** Run ID. |\n\
            | `--start-delay` | No | **RFC3339** When to start. |\n\
            | `--workflow-id`, `-w` | Yes | **string** Workflow ID. |\n\n";
        assert!(docs["workflow"].contains(expected), "{}", docs["workflow"]);
    }

    #[test]
    fn test_experimental_marker() {
        let docs = fixture_docs();
        assert!(docs["workflow"]
            .contains("| `--reason` | No | **string** Reason for cancellation. _(Experimental)_ |\n"));
    }

    #[test]
    fn test_top_level_leaf_has_local_table() {
        let docs = fixture_docs();
        assert!(docs["config"].contains("| `--tls` | No | **bool** Enable TLS. |\n"));
    }
}

// =============================================================================
// Global Flags
// =============================================================================

mod global_flags_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_global_section_once_per_document() {
        let docs = fixture_docs();
        for doc in docs.values() {
            assert_eq!(doc.matches("## Global Flags").count(), 1);
        }
    }

    #[test]
    fn test_global_section_contents() {
        let docs = fixture_docs();
        let expected = "## Global Flags\n\n\
            The following options can be used with any command.\n\n\
            | Flag | Required | Description | Default |\n\
            |------|----------|-------------|--------|\n\
            | `--address` | No | **string** Service address. | `localhost:7233` |\n\
            | `--command-timeout` | No | **duration** Timeout for the whole command. | `0s` |\n\
            | `--log-level` | No | **string-enum** Log level. Accepted values: debug, info, warn, error. | `info` |\n\
            | `--namespace`, `-n` | No | **string** Namespace to use. | `default` |\n\n";
        assert!(docs["workflow"].ends_with(expected), "{}", docs["workflow"]);
    }

    #[test]
    fn test_first_definition_wins() {
        let docs = fixture_docs();
        let doc = &docs["workflow"];
        assert_eq!(doc.matches("`--namespace`").count(), 1);
        assert!(!doc.contains("Namespace scope override."));
    }

    #[test]
    fn test_no_global_section_without_outer_options() {
        let docs = render(
            "commands:\n  - name: app\n  - name: app solo\n    description: Alone.\n    options:\n      - name: flag\n        type: bool\n        description: A flag.\n",
        )
        .unwrap();
        assert!(!docs["solo"].contains("## Global Flags"));
        assert!(docs["solo"].contains("| `--flag` | No | **bool** A flag. |\n"));
    }
}

// =============================================================================
// Errors
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_option_set() {
        let err = render("commands:\n  - name: app\n  - name: app run\n    option-sets: [nope]\n").unwrap_err();
        assert!(matches!(err.root_cause(), CmdgenError::OptionSetNotFound { .. }));
    }

    #[test]
    fn test_nested_command_needs_top_level_document() {
        let err = render("commands:\n  - name: app\n  - name: app a b\n").unwrap_err();
        assert!(matches!(
            err.root_cause(),
            CmdgenError::MissingDocument { document, .. } if document == "a"
        ));
    }
}
