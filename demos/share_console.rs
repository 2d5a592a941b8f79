//! Scripted admin session against the distribution engine
//!
//! Run with: cargo run --example share_console [MAX_HANDLES]
//!
//! Examples:
//!   cargo run --example share_console        # unlimited handles
//!   cargo run --example share_console 2      # refuse a third live handle
//!
//! Set RUST_LOG=localshare=debug for per-reference logging.
//!
//! ## What it does
//!
//! - Provisions Alice and Bob (online) and Charlie (offline)
//! - Shares a PDF and two images, one of which is an unsupported type
//! - Opens an image in the viewer, revokes it from everyone, then closes
//!   the viewer to show the deferred handle release
//! - Prints change notifications from a separate task as they arrive

use localshare::{
    ArtifactKey, DistributionEngine, DistributionEvent, EngineConfig, RawFile, Recipient,
    RecipientId, RecipientRegistry,
};

fn print_usage() {
    eprintln!("Usage: share_console [MAX_HANDLES]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  MAX_HANDLES  Maximum live payload handles (default: 0 = unlimited)");
}

fn print_overview(engine: &DistributionEngine) {
    println!("--- Shared files ---");
    for (artifact, holders) in engine.shared_overview() {
        let names: Vec<&str> = holders.iter().map(|r| r.display_name.as_str()).collect();
        println!(
            "  {} [{}] {} -> {}",
            artifact.id(),
            artifact.kind(),
            artifact.display_name(),
            if names.is_empty() {
                "(viewer only)".to_string()
            } else {
                names.join(", ")
            }
        );
    }
    let stats = engine.stats();
    println!(
        "  live handles: {}  released: {}",
        stats.live_handles(),
        stats.handles_released
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let max_handles = match args.get(1) {
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) => n,
            Err(e) => {
                eprintln!("Error: invalid MAX_HANDLES '{}': {}", arg, e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => 0,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localshare=info".parse()?)
                .add_directive("share_console=debug".parse()?),
        )
        .init();

    let mut registry = RecipientRegistry::new();
    registry.provision(Recipient::online("user-1", "Alice (Desktop-A)"))?;
    registry.provision(Recipient::online("user-2", "Bob (Laptop-B)"))?;
    registry.provision(Recipient::offline("user-3", "Charlie (Tablet-C)"))?;

    let config = EngineConfig::default().max_handles(max_handles);
    let mut engine = DistributionEngine::with_config(registry, config);

    let mut rx = engine.subscribe();
    let observer = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match event {
                DistributionEvent::ArtifactAdmitted {
                    artifact,
                    display_name,
                    kind,
                } => println!("  + {} {} ({})", artifact, display_name, kind),
                DistributionEvent::ArtifactReleased { artifact, handle } => {
                    println!("  - {} released {}", artifact, handle)
                }
                other => tracing::debug!(event = ?other, "Event"),
            }
        }
    });

    let alice = RecipientId::new("user-1");
    let bob = RecipientId::new("user-2");
    let charlie = RecipientId::new("user-3");

    let files = [
        RawFile::new("quarterly.pdf", "application/pdf", "%PDF-1.7 ..."),
        RawFile::new("diagram.png", "image/png", &b"\x89PNG\r\n\x1a\n"[..]),
        RawFile::new("team.jpg", "image/jpeg", &b"\xff\xd8\xff"[..]),
        RawFile::new("notes.txt", "text/plain", "not shareable"),
    ];

    let report = engine.share(&[alice.clone(), bob.clone(), charlie.clone()], &files)?;
    println!(
        "Shared {} file(s) with {} recipient(s), {} skipped, {} failed",
        report.files_shared(),
        report.recipients_reached,
        report.rejected_count,
        report.failed.len()
    );
    if let Err(e) = report.clone().ensure_allocated() {
        println!("Allocation error: {}", e);
    }

    print_overview(&engine);

    if let Some(diagram) = engine
        .catalog()
        .find(&ArtifactKey::from_display_name("diagram.png"))
        .filter(|a| a.is_image())
        .map(|a| a.id())
    {
        let focus = engine.open_viewer(diagram)?;
        println!("Viewing {} at {}", focus.display_name, focus.address);
        engine.viewer_mut().zoom_in();
        if let Some(focus) = engine.viewer().focus() {
            println!("Zoom: {}%", focus.zoom_percent());
        }

        let affected = engine.revoke_from_all(diagram)?;
        println!("Revoked {} from {} recipient(s) while open", diagram, affected);
        print_overview(&engine);

        engine.close_viewer();
        println!("Viewer closed");
    }

    if let Some(pdf) = report.admitted.first().map(|a| a.id()) {
        engine.revoke(&alice, pdf);
        engine.revoke(&bob, pdf);
    }

    print_overview(&engine);

    // Dropping the engine closes the channel and ends the observer
    drop(engine);
    observer.await?;

    Ok(())
}
