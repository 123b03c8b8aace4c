//! Configuration feeding the render pipeline

use std::fs;

use tempfile::TempDir;

use moo_core::{
    load_config_with_env, Action, Composer, ConfigOverrides, ConfigSource, CowCatalog,
    ModeCatalog, WrapOption,
};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_config_defaults_and_custom_cows() {
    let dir = TempDir::new().unwrap();
    let cows = dir.path().join("cows");
    fs::create_dir(&cows).unwrap();
    fs::write(cows.join("dot.cow"), "$thoughts .$eyes.").unwrap();

    let config_path = dir.path().join("moo.toml");
    fs::write(
        &config_path,
        format!(
            "[defaults]\ncow = \"dot\"\nwrap = false\naction = \"think\"\n\n[cows]\npath = {:?}\n",
            cows.display().to_string()
        ),
    )
    .unwrap();

    let config = load_config_with_env(Some(config_path), no_env).unwrap();
    assert_eq!(config.source(), ConfigSource::File);
    assert_eq!(config.cows_path.as_deref(), Some(cows.as_path()));

    let mut catalog = CowCatalog::builtin().clone();
    catalog.extend_from_dir(&cows).unwrap();
    let composer = Composer::new(ModeCatalog::builtin(), &catalog);

    let cow = composer.render("hmm", &config.render_options());
    assert_eq!(cow, " _____\n( hmm )\n -----\no .oo.");
}

#[test]
fn test_cli_beats_env_beats_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("moo.toml");
    fs::write(&config_path, "[defaults]\ncow = \"tux\"\nwrap = 12\naction = \"think\"\n").unwrap();

    let env = |key: &str| (key == "MOO_COW").then(|| "sheep".to_string());
    let mut config = load_config_with_env(Some(config_path), env).unwrap();
    assert_eq!(config.cow.as_deref(), Some("sheep"));
    assert_eq!(config.wrap, WrapOption::Number(12.0));
    assert_eq!(config.source(), ConfigSource::Env);

    ConfigOverrides::new()
        .with_cow("moose".to_string())
        .with_action(Action::Say)
        .apply(&mut config);
    assert_eq!(config.cow.as_deref(), Some("moose"));
    assert_eq!(config.action, Action::Say);
    assert_eq!(config.source(), ConfigSource::Cli);
}
