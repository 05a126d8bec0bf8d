use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (output, stdout, _) = run(test.command().arg("init"))?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Created .lingorc.json"));

    let content = test.read_file(".lingorc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["defaultLocale"], "en");
    assert_eq!(parsed["translationsRoot"], "./translation/data");
    assert!(parsed.get("messageFunctions").is_some());
    assert!(content.contains("\n  \"locales\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lingorc.json", "{}")?;

    let (output, _, stderr) = run(test.command().arg("init"))?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains(".lingorc.json already exists"));
    assert_eq!(test.read_file(".lingorc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_usable() -> Result<()> {
    let test = CliTest::new()?;
    run(test.command().arg("init"))?;
    test.write_file(
        "src/app.tsx",
        r#"export const A = () => <FormattedMessage id="a" defaultMessage="A" />;"#,
    )?;

    let (output, _, _) = run(&mut test.command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.exists("translation/data/en.json"));

    Ok(())
}
