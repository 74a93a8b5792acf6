mod list;
mod prompt;

use lenv_backend::{LenvError, Version};
use lenv_core::{
    HttpDownloader, InstallOutcome, Language, Registry, UninstallOutcome, ZipExtractor,
    activation_for_current_platform,
};
use lenv_platform::LenvPaths;
use log::debug;

use crate::cli::{Action, Command};

pub async fn run(command: Command, paths: &LenvPaths) -> Result<(), LenvError> {
    match command {
        Command::Root => {
            println!("{}", paths.root.display());
            Ok(())
        }
        Command::Java { action } => run_action(Language::Java, action, paths).await,
        Command::Python { action } => run_action(Language::Python, action, paths).await,
    }
}

async fn run_action(
    language: Language,
    action: Action,
    paths: &LenvPaths,
) -> Result<(), LenvError> {
    let mut registry = Registry::load(paths.namespace(language.as_str()))?;
    debug!(
        "Loaded {language} registry: {} installed, global {:?}",
        registry.installed().len(),
        registry.global().map(Version::name)
    );

    match action {
        Action::Install(target) => install(&mut registry, language, &target.target).await,
        Action::Uninstall { target, yes } => {
            uninstall(&mut registry, language, &target.target, yes)
        }
        Action::List { all: false } => {
            let entries = lenv_core::list_installed(&registry);
            print!("{}", list::render_installed(&entries));
            Ok(())
        }
        Action::List { all: true } => {
            let prefix = lenv_core::require_platform_prefix()?;
            let downloader = HttpDownloader::new()?;
            let entries =
                lenv_core::list_available(&registry, language, &downloader, &prefix).await?;
            print!("{}", list::render_available(&entries));
            Ok(())
        }
        Action::Global(target) => global(&mut registry, language, &target.target),
    }
}

async fn install(
    registry: &mut Registry,
    language: Language,
    target: &Version,
) -> Result<(), LenvError> {
    let prefix = lenv_core::require_platform_prefix()?;
    let downloader = HttpDownloader::new()?;

    println!("Installing {language} version {target}...");
    let outcome = lenv_core::install(
        registry,
        language,
        &downloader,
        &ZipExtractor,
        &prefix,
        target,
    )
    .await?;
    match outcome {
        InstallOutcome::AlreadyInstalled(version) => {
            println!("{language} version {version} is already installed");
        }
        InstallOutcome::Installed(version) => {
            registry.save()?;
            println!("{language} version {version} installed");
        }
    }
    Ok(())
}

fn uninstall(
    registry: &mut Registry,
    language: Language,
    target: &Version,
    yes: bool,
) -> Result<(), LenvError> {
    let outcome = lenv_core::uninstall(registry, target, |version| {
        yes || prompt::confirm(&format!(
            "{language} version {version} is set as global, \
             are you sure you want to uninstall it? [y/N]: "
        ))
    })?;

    match outcome {
        UninstallOutcome::Removed(version) => {
            registry.save()?;
            println!("{language} version {version} uninstalled");
        }
        UninstallOutcome::Declined(version) => {
            println!("{language} version {version} was kept");
        }
    }
    Ok(())
}

fn global(registry: &mut Registry, language: Language, target: &Version) -> Result<(), LenvError> {
    let strategy = activation_for_current_platform()?;
    let version = lenv_core::set_global(registry, strategy.as_ref(), language.home_var(), target)?;
    registry.save()?;

    println!("{language} version {version} set as global");
    Ok(())
}
