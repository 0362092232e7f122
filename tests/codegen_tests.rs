//! Code generator integration tests
//!
//! Generates units from YAML specifications with the pass-through formatter
//! and checks the emitted clap builder code.

use cmdgen::codegen::{generate_code_with, SourceFormatter, Verbatim};
use cmdgen::{parse_commands, CmdgenError, Commands};

const FIXTURE: &str = include_str!("fixtures/commands.yaml");

fn fixture() -> Commands {
    parse_commands(FIXTURE.as_bytes()).unwrap()
}

fn generate(commands: &Commands) -> cmdgen::Result<String> {
    generate_code_with("commands", "&CommandContext", commands, &Verbatim)
        .map(|bytes| String::from_utf8(bytes).unwrap())
}

fn generate_yaml(yaml: &str) -> cmdgen::Result<String> {
    generate(&parse_commands(yaml.as_bytes()).unwrap())
}

// =============================================================================
// Unit Layout
// =============================================================================

mod layout_tests {
    use super::*;

    #[test]
    fn test_header_and_unit_name() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.starts_with("// Code generated by cmdgen. DO NOT EDIT.\n// Unit: commands\n"));
    }

    #[test]
    fn test_use_block_sorted_and_unique() {
        let unit = generate(&fixture()).unwrap();
        let uses: Vec<&str> = unit.lines().filter(|line| line.starts_with("use ")).collect();

        let mut sorted = uses.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(uses, sorted);

        assert!(uses.contains(&"use crate::shared;"));
        assert!(uses.contains(&"use std::rc::Rc;"));
        assert!(uses.contains(&"use clap::value_parser;"));
        assert!(uses.contains(&"use chrono::DateTime;"));
    }

    #[test]
    fn test_support_fragments_spliced() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("pub fn parse_duration("));
        assert!(unit.contains("pub struct StringEnumArray"));
        assert!(unit.contains("pub struct Timestamp("));
        assert!(unit.contains("pub fn normalize_aliases("));
        assert!(!unit.contains("super::"));
    }

    #[test]
    fn test_deterministic() {
        let commands = fixture();
        assert_eq!(generate(&commands).unwrap(), generate(&commands).unwrap());
    }
}

// =============================================================================
// Records
// =============================================================================

mod record_tests {
    use super::*;

    #[test]
    fn test_internal_option_set_record() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("/// Options for connecting to the service.\n#[derive(Debug, Clone, Default)]\npub struct ClientOptions {\n    pub address: String,\n    pub namespace: String,\n    pub flag_set: FlagSet,\n}"));
        assert!(unit.contains("pub fn build_flags(&mut self, mut cmd: Command, global: bool) -> Command {"));
        assert!(unit.contains("self.flag_set = FlagSet::from_matches(m, &[\"address\", \"namespace\"]);"));
    }

    #[test]
    fn test_external_option_set_is_referenced_only() {
        let unit = generate(&fixture()).unwrap();
        assert!(!unit.contains("pub struct SharedTlsOptions"));
        assert!(unit.contains("pub shared_tls_options: shared::SharedTlsOptions,"));
    }

    #[test]
    fn test_command_record_fields() {
        let unit = generate(&fixture()).unwrap();
        let record = "pub struct AppWorkflowStartCommand {\n    pub parent: Option<Rc<AppWorkflowCommand>>,\n    pub command: Command,\n    pub workflow_reference_options: WorkflowReferenceOptions,\n    pub input: Vec<String>,\n    pub execution_timeout: Duration,\n    pub start_delay: Timestamp,\n    pub priority: i64,\n}";
        assert!(unit.contains(record), "missing record in:\n{}", unit);
        assert!(unit.contains("pub struct AppCommand {\n    pub command: Command,"));
    }

    #[test]
    fn test_command_consts() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("pub const IGNORES_MISSING_ENV: bool = true;"));
        assert!(unit.contains("pub const DEPRECATED: &'static str = \"Use app workflow terminate.\";"));
        assert!(unit.contains("eprintln!(\"Command {:?} is deprecated, {}\", \"app workflow cancel\", Self::DEPRECATED);"));
    }
}

// =============================================================================
// Constructors
// =============================================================================

mod constructor_tests {
    use super::*;

    #[test]
    fn test_subcommands_registered_and_required() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("s.command = s.command.subcommand(AppWorkflowCommand::new(cctx, highlight).command);"));
        assert!(unit.contains("s.command = s.command.subcommand(AppConfigCommand::new(cctx, highlight).command);"));
        assert!(unit.contains("s.command = s.command.subcommand_required(true);"));
    }

    #[test]
    fn test_highlight_choice_is_a_parameter() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains(".about(if highlight { \"Start a \\u{1b}[1mworkflow\\u{1b}[0m\" } else { \"Start a `workflow`\" })"));
        assert!(unit.contains(".about(\"Cancel a workflow\")"));
    }

    #[test]
    fn test_usage_only_on_leaves() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains(".override_usage(\"app workflow start [flags]\")"));
        assert!(!unit.contains(".override_usage(\"app workflow [flags]\")"));
    }

    #[test]
    fn test_arity_and_init() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("s.command = with_arity(s.command, Arity::Exact(1));"));
        assert!(unit.contains("s.init_command(cctx);"));
    }

    #[test]
    fn test_flag_builders() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("s.execution_timeout = Duration::from_millis(86400000);"));
        assert!(unit.contains("s.log_level = StringEnum::new(&[\"debug\", \"info\", \"warn\", \"error\", \"trace\"], \"info\");"));
        assert!(unit.contains("Arg::new(\"input\").long(\"input\").short('i').action(ArgAction::Append)"));
        assert!(unit.contains(".value_parser(value_parser!(i64)).default_value(\"3\")"));
        assert!(unit.contains(".value_name(\"RFC3339\")"));
        assert!(unit.contains(".help(\"Reason for cancellation. EXPERIMENTAL.\")"));
        assert!(unit.contains(".help(\"Workflow ID. Required. Aliased as \\\"--wid\\\".\")"));
        assert!(unit.contains(".required(!global)"));
        assert!(!unit.contains(".global(true).env(\"APP_ADDRESS\")"));
        assert!(unit.contains(".global(global).env(\"APP_ADDRESS\"))"));
    }

    #[test]
    fn test_remaining_type_rows() {
        let unit = generate_yaml(
            r#"
commands:
  - name: app
    options:
      - name: kinds
        type: string-enum[]
        description: Kinds to include.
        enum-values: [x, y]
        default: x
      - name: ratio
        type: float
        description: Sampling ratio.
        default: 0.5
      - name: old
        type: string
        description: Old option.
        deprecated: Use --new.
"#,
        )
        .unwrap();
        assert!(unit.contains("pub kinds: StringEnumArray,"));
        assert!(unit.contains("s.kinds = StringEnumArray::new(&[\"x\", \"y\"], &[\"x\"]);"));
        assert!(unit.contains("Arg::new(\"kinds\").long(\"kinds\").action(ArgAction::Append).default_value(\"x\")"));

        assert!(unit.contains("pub ratio: f32,"));
        assert!(unit.contains("s.ratio = 0.5;"));
        assert!(unit.contains(".value_parser(value_parser!(f32)).default_value(\"0.5\")"));

        assert!(unit.contains(".help(\"Old option.\").hide(true))"));
        assert!(unit.contains("warn_deprecated(m, \"old\", \"Use --new.\");"));
    }

    #[test]
    fn test_deprecated_command_hidden() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains(".override_usage(\"app workflow cancel [flags]\")\n            .hide(true);"));
        assert_eq!(unit.matches("\n            .hide(true);").count(), 1);
    }

    #[test]
    fn test_punctuated_names_split_into_words() {
        let unit = generate_yaml(
            r#"
option-sets:
  - name: tls.v2
    options:
      - name: cert.path
        type: string
commands:
  - name: app
  - name: app config.get
    option-sets: [tls.v2]
"#,
        )
        .unwrap();
        assert!(unit.contains("pub struct TlsV2Options {\n    pub cert_path: String,"));
        assert!(unit.contains("pub struct AppConfigGetCommand {"));
        assert!(unit.contains("pub tls_v2_options: TlsV2Options,"));
        assert!(unit.contains("s.command = s.command.subcommand(AppConfigGetCommand::new(cctx, highlight).command);"));
    }

    #[test]
    fn test_option_sets_built_with_propagation() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("s.command = s.client_options.build_flags(s.command, true);"));
        assert!(unit.contains("s.command = s.workflow_reference_options.build_flags(s.command, false);"));
    }

    #[test]
    fn test_alias_table() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("s.command = normalize_aliases(s.command, &[(\"wid\", \"workflow-id\")]);"));
    }

    #[test]
    fn test_alias_table_sorted() {
        let unit = generate_yaml(
            r#"
commands:
  - name: app
    options:
      - name: foo
        type: string
        aliases: [y]
      - name: bar
        type: string
        aliases: [x]
"#,
        )
        .unwrap();
        assert!(unit.contains("normalize_aliases(s.command, &[(\"x\", \"bar\"), (\"y\", \"foo\")]);"));
    }
}

// =============================================================================
// Dispatch
// =============================================================================

mod dispatch_tests {
    use super::*;

    #[test]
    fn test_group_routes_subcommands() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("Some((\"start\", sub)) => {"));
        assert!(unit.contains("let mut child = AppWorkflowStartCommand::new(cctx, highlight);"));
        assert!(unit.contains("child.parent = Some(Rc::clone(&s));"));
    }

    #[test]
    fn test_leaf_defers_to_run() {
        let unit = generate(&fixture()).unwrap();
        assert!(unit.contains("if let Err(err) = s.run(cctx, positional_args(matches)) {"));
    }

    #[test]
    fn test_root_has_entry_point() {
        let unit = generate(&fixture()).unwrap();
        assert_eq!(unit.matches("pub fn execute<I, T>").count(), 1);
    }
}

// =============================================================================
// Errors
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_bool_default_fails_with_command_context() {
        let err = generate_yaml(
            "commands:\n  - name: app\n    options:\n      - name: verbose\n        type: bool\n        default: true\n",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("failed writing command app:"));
        assert!(matches!(err.root_cause(), CmdgenError::InvalidDefault { option, .. } if option == "verbose"));
    }

    #[test]
    fn test_enum_without_values_fails() {
        let err = generate_yaml(
            "option-sets:\n  - name: output\n    options:\n      - name: format\n        type: string-enum\n",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("failed writing option set output:"));
        assert!(matches!(err.root_cause(), CmdgenError::InvalidOption { .. }));
    }

    #[test]
    fn test_unknown_type_fails() {
        let err = generate_yaml(
            "commands:\n  - name: app\n    options:\n      - name: size\n        type: uint\n",
        )
        .unwrap_err();
        assert!(matches!(err.root_cause(), CmdgenError::UnknownOptionType { .. }));
    }

    #[test]
    fn test_invalid_duration_default_fails() {
        let err = generate_yaml(
            "commands:\n  - name: app\n    options:\n      - name: wait\n        type: duration\n        default: soon\n",
        )
        .unwrap_err();
        assert!(matches!(err.root_cause(), CmdgenError::InvalidDefault { .. }));
    }

    #[test]
    fn test_name_without_identifier_fails() {
        let err = generate_yaml("commands:\n  - name: \"2fa\"\n").unwrap_err();
        assert!(err.to_string().starts_with("failed writing command 2fa:"));
        assert!(matches!(err.root_cause(), CmdgenError::InvalidName { name, .. } if name == "2fa"));

        let err = generate_yaml("option-sets:\n  - name: \"9\"\n").unwrap_err();
        assert!(err.to_string().starts_with("failed writing option set 9:"));
        assert!(matches!(err.root_cause(), CmdgenError::InvalidName { .. }));
    }

    #[test]
    fn test_missing_option_set_fails() {
        let err = generate_yaml("commands:\n  - name: app\n    option-sets: [nope]\n").unwrap_err();
        assert!(matches!(err.root_cause(), CmdgenError::OptionSetNotFound { set, .. } if set == "nope"));
    }

    #[test]
    fn test_import_collision_is_fatal() {
        let yaml = r#"
option-sets:
  - name: first
    external-package: crate::a::common
  - name: second
    external-package: crate::b::common
commands:
  - name: app
    option-sets: [first, second]
"#;
        let err = generate_yaml(yaml).unwrap_err();
        match err.root_cause() {
            CmdgenError::ImportCollision { alias, path, previous } => {
                assert_eq!(alias, "common");
                assert_eq!(path, "crate::b::common");
                assert_eq!(previous, "crate::a::common");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    struct Broken;

    impl SourceFormatter for Broken {
        fn format(&self, _source: &str) -> Result<String, String> {
            Err("error: expected item".to_string())
        }
    }

    #[test]
    fn test_format_failure_keeps_unformatted_unit() {
        let err = generate_code_with("commands", "&CommandContext", &fixture(), &Broken).unwrap_err();
        match err {
            CmdgenError::SourceFormat { message, source_text } => {
                assert_eq!(message, "error: expected item");
                assert!(source_text.starts_with("// Code generated by cmdgen. DO NOT EDIT."));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
