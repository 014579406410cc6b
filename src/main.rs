use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};
use std::path::Path;
use pyrust_release::{
    arguments::Arguments,
    git::GitTracker,
    index::PackageIndex,
    pyproject::PyProject,
    release::{Releaser, no_changes_message},
    versions::select_targets,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let path: &Path = args.path.as_ref();
    let manifest = path.join(&args.manifest);

    let current_version = PyProject::load(&manifest)?.current_version()?;
    info!("Current {} version: {}", args.package, current_version);

    let index = PackageIndex::new(&args.index_url)?;
    let available = index.fetch_versions(&args.package).await?;
    let targets = select_targets(&current_version, &available, args.ordering)?;

    if targets.is_empty() {
        info!("{} {} is the latest version", args.package, current_version);
        return Ok(());
    }

    if args.dry_run {
        for version in &targets {
            println!("{}", version);
        }
        return Ok(());
    }

    let git = GitTracker::open(path)?;
    let report = Releaser::new(&git, &manifest, &args.package).release_all(&targets)?;
    if let Some(version) = &report.stopped_at {
        println!("{}", no_changes_message(version));
    }
    info!("Released {} version(s): {:?}", report.released.len(), report.released);

    Ok(())
}
