//! `catalog-cli cache`: what the offline fallback would show right now.

use crate::render;
use crate::state::AppState;

pub async fn run(state: &AppState) -> anyhow::Result<()> {
    print!("{}", summary(state).await?);
    Ok(())
}

/// Product count, last refresh time and the cached table.
pub async fn summary(state: &AppState) -> anyhow::Result<String> {
    let products = state.db.products();
    let count = products.count().await?;

    let refreshed = match products.last_refreshed().await? {
        Some(at) => at.to_rfc3339(),
        None => "never".to_string(),
    };

    let mut out = format!(
        "Cache: {}\nProducts: {count}\nLast refreshed: {refreshed}\n",
        state.config.database_path().display()
    );

    if count > 0 {
        out.push('\n');
        out.push_str(&render::table(&products.get_all().await?));
    }

    Ok(out)
}
