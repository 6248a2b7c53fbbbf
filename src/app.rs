use crate::config::{TreeConfig, WORLD_HEIGHT, WORLD_WIDTH};
use crate::help::{draw_overlay, show_help_modal, HELP};
use crate::raster::Raster;
use crate::scene::{Action, Scene};
use crate::terminal::Terminal;
use rand::prelude::*;
use std::io;
use tracing::info;

/// Run the blossom tree
pub fn run(config: TreeConfig) -> io::Result<()> {
    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0) // Fallback seed for misconfigured system clocks
    });
    info!(seed, level = config.level, "starting");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new(config.level, WORLD_WIDTH, WORLD_HEIGHT);

    if config.print {
        let mut term = Terminal::detached();
        let mut raster = raster_for(&term, &config);
        render_frame(&mut term, &mut raster, &scene, &mut rng);
        term.print_to_stdout();
        return Ok(());
    }

    run_interactive(&config, &mut scene, &mut rng)
}

fn run_interactive(config: &TreeConfig, scene: &mut Scene, rng: &mut StdRng) -> io::Result<()> {
    let mut term = Terminal::new()?;
    term.clear_screen()?;
    let mut raster = raster_for(&term, config);

    loop {
        let (w, h) = term.size();
        let (new_w, new_h) = crossterm::terminal::size().unwrap_or((w, h));
        if new_w != w || new_h != h {
            info!(width = new_w, height = new_h, "terminal resized");
            term.resize(new_w, new_h);
            term.clear_screen()?;
            raster = raster_for(&term, config);
        }

        // Drain every pending key so held arrows do not lag behind
        while let Some((code, mods)) = term.check_key()? {
            match scene.handle_key(code, mods, rng) {
                Action::Quit => return Ok(()),
                Action::Help => {
                    if show_help_modal(&mut term, HELP)? {
                        return Ok(());
                    }
                }
                Action::None => {}
            }
        }

        scene.step();

        render_frame(&mut term, &mut raster, scene, rng);
        term.present()?;
        term.sleep(config.time_step);
    }
}

fn raster_for(term: &Terminal, config: &TreeConfig) -> Raster {
    let (w, h) = term.size();
    Raster::new(w, h, WORLD_WIDTH, WORLD_HEIGHT, config.sky)
}

/// Tree, petals and overlay into the back buffer
fn render_frame(term: &mut Terminal, raster: &mut Raster, scene: &Scene, rng: &mut StdRng) {
    raster.clear();
    scene.draw(raster, rng);

    term.clear();
    raster.blit(term);
    draw_overlay(term, scene.level(), scene.petal_count(), scene.is_paused());
}
