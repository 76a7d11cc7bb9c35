use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_init(path: Option<PathBuf>, force: bool) -> Result<(), AppError> {
    let root = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let written = crate::app::api::init(&root, force)?;
    for path in &written {
        println!("  {}", path.display());
    }
    println!("✅ Initialized carrier-owl in {}", root.display());
    Ok(())
}
