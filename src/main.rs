use std::env;
use std::error::Error;
use std::time::Instant;

use image::{imageops, GrayImage, Rgb, RgbImage};
use rand::Rng;

use crate::config::RenderConfig;
use crate::model::Model;
use crate::transform::Viewport;
use crate::vec2::Vec2;

mod config;
mod matrix;
mod model;
mod raster;
mod transform;
mod vec2;
mod vec3;
mod vec4;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn main() -> Result<(), Box<dyn Error>> {
    let config = match env::args().nth(1) {
        Some(path) => RenderConfig::load(&path)?,
        None => match RenderConfig::load("render.json") {
            Ok(config) => config,
            Err(..) => {
                println!("no render.json found, using defaults");
                RenderConfig::default()
            }
        },
    };

    let model = match Model::load(&config.model) {
        Ok(model) => model,
        // An unreadable mesh degrades to an empty render; parse errors abort.
        Err(err) if err.is_io() => {
            eprintln!("{}, rendering an empty model", err);
            Model::default()
        }
        Err(err) => return Err(err.into()),
    };
    println!(
        "Loaded {}: {} vertices, {} faces",
        config.model.display(),
        model.nverts(),
        model.nfaces()
    );

    let mut framebuffer = RgbImage::new(config.width, config.height);
    let mut zbuffer = GrayImage::new(config.width, config.height);

    let rotation = transform::rotation_y(config.angle.to_radians());
    let viewport = Viewport {
        width: config.width,
        height: config.height,
    };

    println!("Start drawing ...");
    let now = Instant::now();

    let mut rng = rand::thread_rng();
    for i in 0..model.nfaces() {
        let a = viewport.project(&rotation * model.vert_of_face(i, 0));
        let b = viewport.project(&rotation * model.vert_of_face(i, 1));
        let c = viewport.project(&rotation * model.vert_of_face(i, 2));

        if config.wireframe {
            let (pa, pb, pc) = (Vec2::new(a.x, a.y), Vec2::new(b.x, b.y), Vec2::new(c.x, c.y));
            raster::line(pa, pb, &mut framebuffer, WHITE);
            raster::line(pb, pc, &mut framebuffer, WHITE);
            raster::line(pc, pa, &mut framebuffer, WHITE);
        } else {
            let color = Rgb([rng.gen(), rng.gen(), rng.gen()]);
            raster::triangle([a, b, c], &mut framebuffer, &mut zbuffer, color);
        }
    }

    let elapsed = now.elapsed();
    println!("Finished, elapsed: {:.3} ms", elapsed.as_secs_f64() * 1000.0);

    // Projected y grows upward, image files grow downward.
    imageops::flip_vertical_in_place(&mut framebuffer);
    framebuffer.save(&config.output)?;
    println!("Wrote {}", config.output.display());

    if let Some(path) = &config.depth_output {
        imageops::flip_vertical_in_place(&mut zbuffer);
        zbuffer.save(path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
