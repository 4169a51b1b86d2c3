use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rfcanvas::rendering::Screenshot;
use rfcanvas::{CanvasConfig, Color, PixelBuffer, Scene};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rfcanvas", version, about = "Replay saved drawing scenes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a scene and write the result as a PNG
    Render {
        #[command(flatten)]
        input: SceneArgs,
        /// Output PNG path
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Replay a scene and print the SHA-256 digest of the pixels
    Digest {
        #[command(flatten)]
        input: SceneArgs,
    },
}

#[derive(Args)]
struct SceneArgs {
    /// Scene JSON file
    scene: PathBuf,
    /// Canvas config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Background color as #rrggbb or #rrggbbaa
    #[arg(long, value_parser = parse_color)]
    background: Option<Color>,
}

fn parse_color(s: &str) -> std::result::Result<Color, String> {
    Color::from_hex(s).map_err(|e| e.to_string())
}

impl SceneArgs {
    fn replay(&self) -> Result<PixelBuffer> {
        let mut config = match &self.config {
            Some(path) => CanvasConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CanvasConfig::default(),
        };
        if let Some(w) = self.width {
            config.size.width = w;
        }
        if let Some(h) = self.height {
            config.size.height = h;
        }
        if let Some(bg) = self.background {
            config.background = bg;
        }
        config.validate()?;

        let scene = Scene::load(&self.scene)
            .with_context(|| format!("loading scene {}", self.scene.display()))?;
        scene.check_bounds(config.size.width, config.size.height);

        let mut buffer = PixelBuffer::new(config.size.width, config.size.height, config.background)?;
        scene.replay(&mut buffer, &config);
        log::info!(
            "replayed {} shapes onto {}x{}",
            scene.len(),
            config.size.width,
            config.size.height
        );
        Ok(buffer)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { input, out } => {
            let buffer = input.replay()?;
            let shot = Screenshot::capture(&buffer)?;
            std::fs::write(&out, &shot.png_data)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("{} ({}x{}) {}", out.display(), shot.width, shot.height, shot.digest);
        }
        Command::Digest { input } => {
            let buffer = input.replay()?;
            println!("{}", buffer.digest());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_flag_parses_hex() {
        let cli = Cli::try_parse_from([
            "rfcanvas",
            "digest",
            "scene.json",
            "--background",
            "#10203080",
        ])
        .unwrap();
        let Command::Digest { input } = cli.command else {
            panic!("expected digest");
        };
        assert_eq!(input.background, Some(Color::rgba(0x10, 0x20, 0x30, 0x80)));
    }

    #[test]
    fn background_flag_rejects_bad_hex() {
        let res = Cli::try_parse_from(["rfcanvas", "digest", "scene.json", "--background", "#fff"]);
        assert!(res.is_err());
    }
}
