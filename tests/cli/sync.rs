use anyhow::Result;

use crate::{CliTest, run};

const CONFIG: &str = r#"{
  "locales": ["en", "de"],
  "defaultLocale": "en"
}"#;

const APP: &str = r#"import { FormattedMessage } from "react-intl";

export const App = () => (
  <FormattedMessage id="example-id" defaultMessage="Hello" />
);
"#;

fn project(source: &str) -> Result<CliTest> {
    let test = CliTest::with_file(".lingorc.json", CONFIG)?;
    test.write_file("src/app.tsx", source)?;
    Ok(test)
}

#[test]
fn test_new_message_reaches_store_and_bundles() -> Result<()> {
    let test = project(APP)?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Scanned 1 source file, found 1 declaration"));
    assert!(stdout.contains("en (reference)  1 added, 0 changed, 0 orphaned"));
    assert!(stdout.contains("de  1 missing, 0 orphaned, 1 using reference text"));
    assert_eq!(
        test.read_file("translation/data/en.json")?,
        "{\n  \"example-id\": {\n    \"defaultMessage\": \"Hello\"\n  }\n}\n"
    );
    assert_eq!(
        test.read_file("translation/data/compiled-en.json")?,
        "{\n  \"example-id\": \"Hello\"\n}\n"
    );
    assert_eq!(
        test.read_file("translation/data/compiled-de.json")?,
        "{\n  \"example-id\": \"Hello\"\n}\n"
    );
    assert!(!test.exists("translation/data/de.json"));

    Ok(())
}

#[test]
fn test_bare_invocation_runs_sync() -> Result<()> {
    let test = project(APP)?;

    let (output, _, _) = run(&mut test.command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.exists("translation/data/compiled-de.json"));

    Ok(())
}

#[test]
fn test_second_run_is_unchanged() -> Result<()> {
    let test = project(APP)?;
    run(&mut test.sync_command())?;
    let store = test.read_file("translation/data/en.json")?;
    let bundle = test.read_file("translation/data/compiled-de.json")?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("unchanged  translation/data/en.json"));
    assert!(!stdout.contains("written  "));
    assert!(stdout.contains("Synced 2 locales - no issues found"));
    assert_eq!(test.read_file("translation/data/en.json")?, store);
    assert_eq!(test.read_file("translation/data/compiled-de.json")?, bundle);

    Ok(())
}

#[test]
fn test_removed_message_is_orphaned_but_kept() -> Result<()> {
    let test = project(APP)?;
    run(&mut test.sync_command())?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <FormattedMessage id="other-id" defaultMessage="Other" />;"#,
    )?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("warning: \"example-id\"  orphaned-id"));
    assert!(stdout.contains("1 orphaned (kept)"));
    assert!(test.read_file("translation/data/en.json")?.contains("example-id"));
    assert!(
        test.read_file("translation/data/compiled-de.json")?
            .contains("\"example-id\": \"Hello\"")
    );

    Ok(())
}

#[test]
fn test_prune_orphans_removes_them() -> Result<()> {
    let test = project(APP)?;
    test.write_file(
        "translation/data/en.json",
        r#"{ "gone-id": { "defaultMessage": "Gone" } }"#,
    )?;

    let (output, stdout, _) = run(test.sync_command().arg("--prune-orphans"))?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("1 orphaned (pruned)"));
    let store = test.read_file("translation/data/en.json")?;
    assert!(!store.contains("gone-id"));
    assert!(store.contains("example-id"));

    Ok(())
}

#[test]
fn test_strict_orphans_fail_without_writing() -> Result<()> {
    let test = project(APP)?;
    test.write_file(
        "translation/data/en.json",
        r#"{ "gone-id": { "defaultMessage": "Gone" } }"#,
    )?;

    let (output, stdout, _) = run(test.sync_command().arg("--strict-orphans"))?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("error: \"gone-id\"  orphaned-id"));
    assert!(stdout.contains("Nothing written"));
    assert_eq!(
        test.read_file("translation/data/en.json")?,
        r#"{ "gone-id": { "defaultMessage": "Gone" } }"#
    );
    assert!(!test.exists("translation/data/compiled-en.json"));

    Ok(())
}

#[test]
fn test_ambiguous_duplicate_fails_without_writing() -> Result<()> {
    let test = CliTest::with_file(".lingorc.json", CONFIG)?;
    test.write_file(
        "src/a.tsx",
        r#"formatMessage({ id: "dup-id", defaultMessage: "One" });"#,
    )?;
    test.write_file(
        "src/b.tsx",
        r#"formatMessage({ id: "dup-id", defaultMessage: "Two" });"#,
    )?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("error: \"dup-id\"  ambiguous-id"));
    assert!(stdout.contains("src/a.tsx:1:1"));
    assert!(stdout.contains("src/b.tsx:1:1"));
    assert!(stdout.contains("Nothing written: ambiguous ids"));
    assert!(!test.exists("translation"));

    Ok(())
}

#[test]
fn test_identical_duplicates_are_fine() -> Result<()> {
    let test = CliTest::with_file(".lingorc.json", CONFIG)?;
    let source = r#"formatMessage({ id: "same-id", defaultMessage: "Same" });"#;
    test.write_file("src/a.tsx", source)?;
    test.write_file("src/b.tsx", source)?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("found 1 declaration"));

    Ok(())
}

#[test]
fn test_invalid_id_is_reported_and_added() -> Result<()> {
    let test = project(
        r#"export const App = () => <FormattedMessage id="My-Id" defaultMessage="Hi" />;"#,
    )?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("warning: \"My-Id\"  invalid-id"));
    assert!(stdout.contains("--> src/app.tsx:1:26"));
    assert!(test.read_file("translation/data/en.json")?.contains("\"My-Id\""));

    Ok(())
}

#[test]
fn test_dynamic_message_is_skipped_with_warning() -> Result<()> {
    let test = project(
        r#"export const App = ({ label }) => <FormattedMessage id="page.label" defaultMessage={label} />;"#,
    )?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("warning: \"page.label\"  dynamic-message"));
    assert!(!test.read_file("translation/data/en.json")?.contains("page.label"));

    Ok(())
}

#[test]
fn test_translation_used_and_empty_translation_falls_back() -> Result<()> {
    let test = project(
        r#"
const messages = defineMessages({
  title: { id: "page.title", defaultMessage: "Title" },
  body: { id: "page.body", defaultMessage: "Body" },
});
"#,
    )?;
    test.write_file(
        "translation/data/de.json",
        r#"{
  "page.title": { "defaultMessage": "Titel" },
  "page.body": { "defaultMessage": "" }
}"#,
    )?;

    let (output, _, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("translation/data/compiled-de.json")?,
        "{\n  \"page.body\": \"Body\",\n  \"page.title\": \"Titel\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_malformed_locale_file_is_reported_and_treated_as_empty() -> Result<()> {
    let test = project(APP)?;
    test.write_file("translation/data/de.json", "{ oops")?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("--> translation/data/de.json"));
    assert_eq!(test.read_file("translation/data/de.json")?, "{ oops");
    assert_eq!(
        test.read_file("translation/data/compiled-de.json")?,
        "{\n  \"example-id\": \"Hello\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_source_parse_error_is_a_warning() -> Result<()> {
    let test = project(APP)?;
    test.write_file("src/broken.tsx", "const = ;")?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("--> src/broken.tsx"));
    assert!(stdout.contains("parse-error"));
    assert!(test.read_file("translation/data/en.json")?.contains("example-id"));

    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = project(APP)?;

    let (output, stdout, _) = run(test.sync_command().arg("--dry-run"))?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("would write  translation/data/en.json"));
    assert!(!test.exists("translation"));

    Ok(())
}

#[test]
fn test_verbose_lists_ids() -> Result<()> {
    let test = project(APP)?;

    let (_, stdout, _) = run(test.sync_command().arg("-v"))?;

    assert!(stdout.contains("    + example-id"));

    Ok(())
}

#[test]
fn test_root_option_and_config_relative_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "web/.lingorc.json",
        r#"{ "translationsRoot": "i18n", "compiledRoot": "public/i18n" }"#,
    )?;
    test.write_file("web/src/app.tsx", APP)?;

    let (output, _, _) = run(test.sync_command().arg("--root").arg("web"))?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.exists("web/i18n/en.json"));
    assert!(test.exists("web/public/i18n/compiled-en.json"));

    Ok(())
}

#[test]
fn test_explicit_config_from_env() -> Result<()> {
    let test = CliTest::with_file("lingo.json", r#"{ "locales": ["fr"], "defaultLocale": "fr" }"#)?;
    test.write_file("src/app.tsx", APP)?;

    let (output, _, _) = run(test.sync_command().env("LINGO_CONFIG", "lingo.json"))?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.exists("translation/data/fr.json"));
    assert!(test.exists("translation/data/compiled-fr.json"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_internal_error() -> Result<()> {
    let test = CliTest::with_file(
        ".lingorc.json",
        r#"{ "locales": ["en"], "defaultLocale": "de" }"#,
    )?;

    let (output, _, stderr) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("defaultLocale"));
    assert!(!test.exists("translation"));

    Ok(())
}

#[test]
fn test_unusable_translations_dir_is_an_internal_error() -> Result<()> {
    let test = project(APP)?;
    test.write_file("translation/data", "not a directory")?;

    let (output, _, stderr) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("translation/data"));
    assert_eq!(test.read_file("translation/data")?, "not a directory");
    assert!(!test.exists("translation/data/compiled-en.json"));

    Ok(())
}

#[test]
fn test_bundle_write_failure_is_an_internal_error() -> Result<()> {
    let test = CliTest::with_file(
        ".lingorc.json",
        r#"{ "locales": ["en"], "defaultLocale": "en", "compiledRoot": "./public/i18n" }"#,
    )?;
    test.write_file("src/app.tsx", APP)?;
    test.write_file("public/i18n", "not a directory")?;

    let (output, _, stderr) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("public/i18n"));
    assert_eq!(test.read_file("public/i18n")?, "not a directory");

    Ok(())
}

#[test]
fn test_parse_error_withholds_pruning() -> Result<()> {
    let test = project(APP)?;
    test.write_file(
        "src/other.tsx",
        r#"formatMessage({ id: "other", defaultMessage: "Other" });"#,
    )?;
    run(&mut test.sync_command())?;
    test.write_file("src/other.tsx", r#"formatMessage({ id: "other", defaultMessage: "#)?;

    let (output, stdout, _) = run(test.sync_command().arg("--prune-orphans"))?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("1 orphaned (kept)"));
    assert!(stdout.contains("orphans were not pruned because source files failed to parse"));
    assert!(test.read_file("translation/data/en.json")?.contains("\"other\""));
    assert!(test.read_file("translation/data/compiled-de.json")?.contains("\"other\""));

    Ok(())
}

#[test]
fn test_ignores_skip_files() -> Result<()> {
    let test = CliTest::with_file(
        ".lingorc.json",
        r#"{ "ignores": ["src/generated/**"] }"#,
    )?;
    test.write_file("src/app.tsx", APP)?;
    test.write_file(
        "src/generated/gen.tsx",
        r#"formatMessage({ id: "generated-id", defaultMessage: "Gen" });"#,
    )?;

    let (output, stdout, _) = run(&mut test.sync_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Scanned 1 source file"));
    assert!(!test.read_file("translation/data/en.json")?.contains("generated-id"));

    Ok(())
}
