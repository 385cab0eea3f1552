use pretty_assertions::assert_eq;
use standards_sync::transform::{claude, cursor};
use standards_sync::{
    run_roster, Error, FileMap, RoutingTable, SyncConfig, SyncPipeline, TextStyle, Tool,
    TransformContext, Validator,
};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const STANDARDS: &str = r##"# Engineering Standards

This introduction is not part of any section.

## 1. Security

Never commit secrets to the repository. Load them from the environment.

❌ WRONG:

```python
API_KEY = "sk-123"
```

✅ CORRECT:

```python
API_KEY = os.environ["API_KEY"]
```

## 3. Bash Standards

This preamble is discarded because the section has subsections.

### 3.1 File Naming

Scripts should use lowercase names with a .sh extension.

### 3.2 Strict Mode

Always start scripts with strict mode.

```bash
#!/usr/bin/env bash
set -euo pipefail
```

## Team Rituals

Hold a short retro every sprint.
"##;

fn setup(doc: &str) -> (TempDir, SyncConfig) {
    let dir = TempDir::new().unwrap();
    let context = dir.path().join("CONTEXT.md");
    std::fs::write(&context, doc).unwrap();

    let mut config = SyncConfig::default();
    config.paths.context = context;
    config.paths.output_dir = dir.path().join("out");
    (dir, config)
}

fn titles(config: SyncConfig) -> Vec<(String, String)> {
    SyncPipeline::new(config, true)
        .parse()
        .unwrap()
        .into_iter()
        .map(|rule| (rule.section, rule.title))
        .collect()
}

#[test]
fn test_one_rule_per_subsection_or_section() {
    let (_dir, config) = setup(STANDARDS);

    assert_eq!(
        titles(config),
        vec![
            ("Security".to_string(), "Never commit secrets to the repository".to_string()),
            ("Bash Standards".to_string(), "File Naming".to_string()),
            ("Bash Standards".to_string(), "Strict Mode".to_string()),
            ("Team Rituals".to_string(), "Hold a short retro every sprint.".to_string()),
        ]
    );
}

#[test]
fn test_security_section_classification() {
    let (_dir, config) = setup(STANDARDS);
    let rules = SyncPipeline::new(config, true).parse().unwrap();
    let security = &rules[0];

    assert_eq!(security.priority, 100);
    assert_eq!(security.scope, vec!["all".to_string()]);
    assert!(security.has_tag("security"));
    assert_eq!(security.examples.len(), 2);
    assert!(!security.examples[0].is_correct);
    assert!(security.examples[1].is_correct);
    assert!(!security.content.contains("```"));
}

#[test]
fn test_numbered_headings_are_normalized() {
    let (_dir, config) = setup(STANDARDS);
    let rules = SyncPipeline::new(config, true).parse().unwrap();
    let naming = &rules[1];

    assert_eq!(naming.section, "Bash Standards");
    assert_eq!(naming.subsection.as_deref(), Some("File Naming"));
    assert_eq!(naming.scope, vec!["*.sh".to_string(), "*.bash".to_string()]);
    assert!(rules.iter().all(|r| !r.content.contains("preamble")));
}

#[test]
fn test_parsing_is_deterministic() {
    let (_dir, config) = setup(STANDARDS);
    let pipeline = SyncPipeline::new(config, true);

    assert_eq!(pipeline.parse().unwrap(), pipeline.parse().unwrap());
}

#[test]
fn test_sync_writes_every_tool_file() {
    let (dir, config) = setup(STANDARDS);
    let outcome = SyncPipeline::new(config, false).run().unwrap();

    let paths: Vec<&str> = outcome.files.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            ".cursor/rules/006_security.mdc",
            ".cursor/rules/003_bash_standards.mdc",
            ".cursor/rules/001_workspace.mdc",
            "CLAUDE.md",
            ".github/copilot-instructions.md",
            ".aider/.aider.conf.yml",
            ".continue/config.yaml",
        ]
    );
    assert!(outcome.report.passed());
    assert_eq!(outcome.written.len(), outcome.files.len());

    for (relative, content) in &outcome.files {
        let on_disk = std::fs::read_to_string(dir.path().join("out").join(relative)).unwrap();
        assert_eq!(&on_disk, content);
    }
}

#[test]
fn test_generated_files_have_expected_shape() {
    let (_dir, config) = setup(STANDARDS);
    let files = SyncPipeline::new(config, true).run().unwrap().files;

    let bash = &files[".cursor/rules/003_bash_standards.mdc"];
    assert!(bash.starts_with("---\n"));
    assert!(bash.contains("priority: 70"));
    assert!(bash.contains("Scripts MUST use lowercase names"));

    let claude = &files["CLAUDE.md"];
    assert!(claude.contains("## Security"));
    assert!(claude.contains("### Never commit secrets to the repository"));
    assert!(claude.contains("**Why this matters:**"));

    let copilot = &files[".github/copilot-instructions.md"];
    assert!(copilot.contains("# ❌ Bad\nAPI_KEY = \"sk-123\""));
    assert!(copilot.contains("# ✅ Good\nAPI_KEY = os.environ[\"API_KEY\"]"));

    let aider: serde_yaml::Value = serde_yaml::from_str(&files[".aider/.aider.conf.yml"]).unwrap();
    assert_eq!(aider["read"][0], serde_yaml::Value::from("CONTEXT.md"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let (dir, config) = setup(STANDARDS);
    let outcome = SyncPipeline::new(config, true).run().unwrap();

    assert!(outcome.written.is_empty());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_unclosed_fence_blocks_every_write() {
    let doc = "## Documentation\n\nDocument every script.\n\n```bash\necho never closed\n";
    let (dir, config) = setup(doc);

    let err = SyncPipeline::new(config, false).run().unwrap_err();

    assert!(matches!(err, Error::Validation { errors, .. } if errors > 0));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_validator_names_file_with_unclosed_fence() {
    let files = FileMap::from([("CLAUDE.md".to_string(), "# A\n\n```\nx\n".to_string())]);
    let mut validator = Validator::default();

    assert!(!validator.validate_all(&files));
    let messages: Vec<String> = validator.report().errors().map(|e| e.to_string()).collect();
    assert_eq!(messages, vec!["CLAUDE.md: Unclosed code fence".to_string()]);
}

#[test]
fn test_later_tool_wins_on_shared_path() {
    let (_dir, config) = setup(STANDARDS);
    let rules = SyncPipeline::new(config, true).parse().unwrap();
    let style = TextStyle::default();
    let routing = RoutingTable {
        default_path: claude::OUTPUT_FILE.to_string(),
        sections: vec![],
        tags: vec![],
    };
    let ctx = TransformContext {
        style: &style,
        routing: &routing,
        source_name: "CONTEXT.md",
    };

    let cursor_only = cursor::transform(&rules, &ctx).unwrap();
    let claude_only = claude::transform(&rules, &ctx);
    assert!(cursor_only[claude::OUTPUT_FILE].starts_with("---\n"));

    let files = run_roster(&[Tool::Cursor, Tool::Claude], &rules, &ctx).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[claude::OUTPUT_FILE], claude_only[claude::OUTPUT_FILE]);

    let reversed = run_roster(&[Tool::Claude, Tool::Cursor], &rules, &ctx).unwrap();
    assert_eq!(reversed[claude::OUTPUT_FILE], cursor_only[claude::OUTPUT_FILE]);
}

#[test]
fn test_roster_order_is_respected() {
    let (_dir, config) = setup(STANDARDS);
    let rules = SyncPipeline::new(config, true).parse().unwrap();
    let style = TextStyle::default();
    let routing = RoutingTable::default();
    let ctx = TransformContext {
        style: &style,
        routing: &routing,
        source_name: "CONTEXT.md",
    };

    let files = run_roster(&[Tool::Copilot, Tool::Claude], &rules, &ctx).unwrap();
    let paths: Vec<&str> = files.keys().map(String::as_str).collect();

    assert_eq!(paths, vec![".github/copilot-instructions.md", "CLAUDE.md"]);
}

fn cli(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_standards-sync"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_cli_exit_codes() {
    let (dir, _config) = setup(STANDARDS);

    let dry = cli(dir.path(), &["--dry-run", "--output-dir", "out"]);
    assert!(dry.status.success());
    assert!(String::from_utf8_lossy(&dry.stdout).contains("more lines"));
    assert!(!dir.path().join("out").exists());

    let missing = cli(dir.path(), &["--context", "MISSING.md"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("input stage failed"));

    let sync = cli(dir.path(), &["sync", "--output-dir", "out"]);
    assert!(sync.status.success());
    assert!(dir.path().join("out/CLAUDE.md").exists());

    let unknown_flag = cli(dir.path(), &["--bogus"]);
    assert_eq!(unknown_flag.status.code(), Some(1));

    let help = cli(dir.path(), &["--help"]);
    assert!(help.status.success());
}

#[test]
fn test_cli_tool_roster_override() {
    let (dir, _config) = setup(STANDARDS);

    let sync = cli(dir.path(), &["--tools", "claude,copilot", "--output-dir", "out"]);

    assert!(sync.status.success());
    assert!(dir.path().join("out/CLAUDE.md").exists());
    assert!(dir.path().join("out/.github/copilot-instructions.md").exists());
    assert!(!dir.path().join("out/.cursor").exists());
}

#[test]
fn test_cli_init_writes_loadable_config() {
    let dir = TempDir::new().unwrap();

    let init = cli(dir.path(), &["init"]);
    assert!(init.status.success());

    let loaded = SyncConfig::load(&dir.path().join("standards-sync.toml")).unwrap();
    assert_eq!(loaded, SyncConfig::default());

    let again = cli(dir.path(), &["init"]);
    assert_eq!(again.status.code(), Some(1));
}
