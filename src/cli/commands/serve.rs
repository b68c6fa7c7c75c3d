use crate::{app, config};

pub async fn handle() -> anyhow::Result<()> {
    app::serve(config::config().clone()).await
}
