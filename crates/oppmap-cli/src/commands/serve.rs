//! Server command implementation

use anyhow::Result;

use super::Context;

pub async fn cmd_serve(ctx: Context, host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting opportunity map server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   API: http://{}:{}/api/health", host, port);
    println!(
        "   Risk seed: {} │ Clusters: {}",
        ctx.engine.config().risk.seed,
        ctx.engine.config().clustering.clusters
    );
    println!();
    println!("   Press Ctrl+C to stop");

    let state = oppmap_server::AppState::new(ctx.engine, ctx.session);
    oppmap_server::serve(state, host, port).await?;

    Ok(())
}
