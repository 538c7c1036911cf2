use std::io::{self, Write};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{sleep, Duration};

use thumbforge::image_data::LocalFile;
use thumbforge::{
    AiGateway, AspectRatio, FlowStatus, Step, StudioController, StyleTag, ThumbForgeConfig,
    ThumbnailOutcome,
};

// Run from the root folder of the repo as follows:
// API_KEY=your-gemini-key-here cargo run --example studio

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    thumbforge::init_logger();

    let config = ThumbForgeConfig::from_env();
    if !config.has_api_key() {
        println!("Warning: API_KEY is not set, every request will fail.");
    }
    let gateway = Arc::new(AiGateway::from_config(&config)?);
    let mut studio = StudioController::from_gateway(gateway);

    loop {
        let keep_going = match studio.step().clone() {
            Step::SelectingTitle => select_title(&mut studio).await,
            Step::CreatingThumbnail { title } => create_thumbnail(&mut studio, &title).await,
        };
        if !keep_going {
            break;
        }
    }
    Ok(())
}

/// Returns false when the user wants to quit.
async fn select_title(studio: &mut StudioController) -> bool {
    if studio.titles().candidates().is_empty() {
        let topic = prompt("\nVideo topic (or 'q' to quit): ");
        if topic == "q" {
            return false;
        }
        let rx = studio.titles().subscribe();
        let dots = tokio::spawn(display_waiting_dots(rx));
        let _ = studio.titles_mut().generate(&topic).await;
        dots.abort();
        println!();
    }

    if let Some(message) = studio.titles().error().or(studio.titles().notice()) {
        println!("{}", message);
    }
    let candidates = studio.titles().candidates().to_vec();
    if candidates.is_empty() {
        return true;
    }

    println!("\nPick the best title:");
    for (idx, title) in candidates.iter().enumerate() {
        println!("{:>3}. {}", idx + 1, title);
    }
    let choice = prompt("Number, 'r' to regenerate, 'n' for a new topic: ");
    match choice.as_str() {
        "r" => {
            let rx = studio.titles().subscribe();
            let dots = tokio::spawn(display_waiting_dots(rx));
            let _ = studio.titles_mut().regenerate().await;
            dots.abort();
            println!();
        }
        "n" => studio.titles_mut().reset(),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= candidates.len() => {
                if let Err(err) = studio.select(&candidates[n - 1]) {
                    println!("{}", err);
                }
            }
            _ => println!("Please enter a number between 1 and {}.", candidates.len()),
        },
    }
    true
}

async fn create_thumbnail(studio: &mut StudioController, title: &str) -> bool {
    println!("\nSelected title: \"{}\"", title);

    if studio.thumbnails().source_image().is_none() {
        let path = prompt("Photo path (or 'b' to go back): ");
        if path == "b" {
            studio.back();
            return true;
        }
        match LocalFile::open(&path).await {
            Ok(file) => {
                if let Err(err) = studio.thumbnails_mut().upload(&file).await {
                    println!("{}", err);
                    return true;
                }
            }
            Err(err) => {
                println!("{}", err);
                return true;
            }
        }

        let ratio = prompt("Format: 1) Landscape (16:9)  2) Shorts (9:16) [1]: ");
        let ratio = if ratio == "2" {
            AspectRatio::Portrait
        } else {
            AspectRatio::Landscape
        };
        studio.thumbnails_mut().set_aspect_ratio(ratio);

        println!("Visual style:");
        for (idx, style) in StyleTag::ALL.iter().enumerate() {
            println!("{:>3}. {} {}", idx + 1, style.icon(), style.label());
        }
        let style = prompt("Style number [1]: ")
            .parse::<usize>()
            .ok()
            .and_then(|n| StyleTag::ALL.get(n.wrapping_sub(1)).copied())
            .unwrap_or_default();
        studio.thumbnails_mut().set_style(style);
    }

    let flow = studio.thumbnails();
    println!(
        "AI is painting in {} style ({})",
        flow.style().id(),
        flow.aspect_ratio()
    );
    let rx = flow.subscribe();
    let dots = tokio::spawn(display_waiting_dots(rx));
    let outcome = studio.generate_thumbnail().await;
    dots.abort();
    println!();

    match outcome {
        Ok(ThumbnailOutcome::Generated(_)) => match studio.save_thumbnail(".").await {
            Ok(path) => println!("Saved {}", path.display()),
            Err(err) => println!("{}", err),
        },
        Ok(ThumbnailOutcome::NoImage) | Err(_) => {
            let flow = studio.thumbnails();
            if let Some(message) = flow.error().or(flow.notice()) {
                println!("{}", message);
            }
        }
        Ok(ThumbnailOutcome::Skipped) => println!("Upload a photo first."),
    }

    let next = prompt("'g' generate again, 'p' new photo, 'b' back to titles, 'q' quit: ");
    match next.as_str() {
        "q" => return false,
        "b" => studio.back(),
        "p" => studio.thumbnails_mut().reset(),
        _ => {}
    }
    true
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    io::stdout().flush().unwrap();
    let mut line = String::new();
    io::stdin().read_line(&mut line).expect("Failed to read line");
    line.trim().to_string()
}

async fn display_waiting_dots(rx: watch::Receiver<FlowStatus>) {
    loop {
        if rx.borrow().is_busy() {
            print!(".");
            io::stdout().flush().unwrap();
        }
        sleep(Duration::from_millis(500)).await;
    }
}
