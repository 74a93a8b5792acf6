use std::path::Path;

use lenv_shell::{ShellConfig, bind_home};
use tempfile::tempdir;

#[test]
fn binding_twice_does_not_duplicate_the_line() {
    let temp_dir = tempdir().expect("create temp dir");
    let bashrc = temp_dir.path().join(".bashrc");
    std::fs::write(&bashrc, "export PATH=$PATH:/usr/local/bin\n").expect("write config");
    let files = vec![bashrc.clone()];
    let link = Path::new("/srv/lenv/java/current");

    let first = bind_home(&files, "JAVA_HOME", link).expect("first bind");
    let second = bind_home(&files, "JAVA_HOME", link).expect("second bind");

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());

    let content = std::fs::read_to_string(&bashrc).expect("read updated config");
    assert_eq!(content.matches("export JAVA_HOME=").count(), 1);
    assert!(content.starts_with("export PATH=$PATH:/usr/local/bin\n"));
}

#[test]
fn apply_edit_creates_parent_directories() {
    let temp_dir = tempdir().expect("create temp dir");
    let nested = temp_dir.path().join("home").join("user").join(".profile");

    let mut config = ShellConfig::load(nested.clone()).expect("load missing config");
    assert!(config.content.is_empty());

    let edit = config.add_line("export PYTHON_HOME=/srv/lenv/python/current");
    config.apply_edit(&edit).expect("apply edit");

    let reloaded = ShellConfig::load(nested).expect("reload config");
    assert!(reloaded.has_line("export PYTHON_HOME=/srv/lenv/python/current"));
}

#[test]
fn a_different_value_for_the_same_variable_is_appended() {
    let temp_dir = tempdir().expect("create temp dir");
    let profile = temp_dir.path().join(".profile");
    std::fs::write(&profile, "export JAVA_HOME=/usr/lib/jvm/default\n").expect("write config");

    let changed = bind_home(
        std::slice::from_ref(&profile),
        "JAVA_HOME",
        Path::new("/srv/lenv/java/current"),
    )
    .expect("bind");

    assert_eq!(changed, vec![profile.clone()]);
    let content = std::fs::read_to_string(&profile).expect("read config");
    assert!(content.ends_with("export JAVA_HOME=\"/srv/lenv/java/current\"\n"));
}

#[test]
fn root_with_spaces_is_bound_as_one_shell_word() {
    let temp_dir = tempdir().expect("create temp dir");
    let profile = temp_dir.path().join(".profile");
    let link = Path::new("/home/me/Application Data/lenv/java/current");

    bind_home(std::slice::from_ref(&profile), "JAVA_HOME", link).expect("bind");
    let changed = bind_home(std::slice::from_ref(&profile), "JAVA_HOME", link).expect("rebind");

    assert!(changed.is_empty());
    assert_eq!(
        std::fs::read_to_string(&profile).expect("read config"),
        "export JAVA_HOME=\"/home/me/Application Data/lenv/java/current\"\n"
    );
}
