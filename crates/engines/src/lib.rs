#![deny(unsafe_code)]
//! Generator registry: maps style names to implementations and runs the
//! render pipeline from a [`Seed`] to pixels or a PNG file.
//!
//! This crate sits between `artgen-core` (which defines the `Generator`
//! trait) and the individual generator crates (`artgen-noise`, etc.). The
//! CLI depends on this crate to avoid duplicating dispatch logic.

pub mod pixel;
pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use artgen_core::canvas::{Canvas, Frame};
use artgen_core::error::EngineError;
use artgen_core::prng::Xorshift64;
use artgen_core::seed::Seed;
use artgen_core::shape::Shape;
use artgen_core::Generator;
use artgen_mosaic::{Polygons, Squares};
use artgen_noise::Noise;
use artgen_radial::Radial;
use artgen_scatter::{Rectangles, Triangles};
use log::debug;
use serde_json::Value;
use tiny_skia::Pixmap;

/// All available style names.
const STYLE_NAMES: &[&str] = &[
    "noise",
    "radial",
    "squares",
    "polygons",
    "triangles",
    "rectangles",
];

/// Enumeration of all available art styles.
///
/// Wraps each generator implementation and delegates `Generator` trait
/// methods. Use [`GeneratorKind::from_name`] for string-based construction.
#[derive(Debug, Clone)]
pub enum GeneratorKind {
    /// Rotated gray polygons over texture lines.
    Noise(Noise),
    /// Starburst of colored lines.
    Radial(Radial),
    /// Grid of squares, diamonds and circles.
    Squares(Squares),
    /// Grid of irregular outlined polygons.
    Polygons(Polygons),
    /// Stacked layers of translucent triangles.
    Triangles(Triangles),
    /// Field of translucent rotated rectangles.
    Rectangles(Rectangles),
}

impl GeneratorKind {
    /// Constructs a generator by style name, reading overrides from `params`.
    ///
    /// Returns `EngineError::UnknownStyle` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, EngineError> {
        match name {
            "noise" => Ok(GeneratorKind::Noise(Noise::from_json(params))),
            "radial" => Ok(GeneratorKind::Radial(Radial::from_json(params))),
            "squares" => Ok(GeneratorKind::Squares(Squares::from_json(params))),
            "polygons" => Ok(GeneratorKind::Polygons(Polygons::from_json(params))),
            "triangles" => Ok(GeneratorKind::Triangles(Triangles::from_json(params))),
            "rectangles" => Ok(GeneratorKind::Rectangles(Rectangles::from_json(params))),
            _ => Err(EngineError::UnknownStyle(name.to_string())),
        }
    }

    /// Returns a slice of all recognized style names.
    pub fn list_generators() -> &'static [&'static str] {
        STYLE_NAMES
    }

    fn inner(&self) -> &dyn Generator {
        match self {
            GeneratorKind::Noise(g) => g,
            GeneratorKind::Radial(g) => g,
            GeneratorKind::Squares(g) => g,
            GeneratorKind::Polygons(g) => g,
            GeneratorKind::Triangles(g) => g,
            GeneratorKind::Rectangles(g) => g,
        }
    }
}

impl Generator for GeneratorKind {
    fn frame(&self) -> Frame {
        self.inner().frame()
    }

    fn generate(&self, canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape> {
        self.inner().generate(canvas, rng)
    }

    fn params(&self) -> Value {
        self.inner().params()
    }

    fn param_schema(&self) -> Value {
        self.inner().param_schema()
    }
}

/// A rendered image together with what went into it.
pub struct Rendered {
    pub pixmap: Pixmap,
    /// Number of shapes the generator produced.
    pub shapes: usize,
}

/// Summary of a completed render written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    pub shapes: usize,
    pub width: u32,
    pub height: u32,
}

/// Runs the recipe in memory: validate, build the generator and canvas,
/// seed the PRNG, generate and rasterize.
pub fn render(seed: &Seed) -> Result<Rendered, EngineError> {
    seed.validate()?;
    let generator = GeneratorKind::from_name(&seed.style, &seed.params)?;
    let canvas = Canvas::new(generator.frame(), seed.background, seed.dpi)?;
    debug!(
        "{}: canvas {}x{} px at {} dpi",
        seed.style,
        canvas.width_px(),
        canvas.height_px(),
        seed.dpi
    );

    let mut rng = Xorshift64::new(seed.seed);
    let shapes = generator.generate(&canvas, &mut rng);
    let pixmap = raster::rasterize(&canvas, &shapes)?;
    Ok(Rendered {
        pixmap,
        shapes: shapes.len(),
    })
}

/// Renders the recipe and writes it as a PNG to `path`.
///
/// On any error before the final write, no file is created.
#[cfg(feature = "png")]
pub fn render_to_path(seed: &Seed, path: &std::path::Path) -> Result<RenderOutcome, EngineError> {
    let rendered = render(seed)?;
    snapshot::write_png(&rendered.pixmap, path)?;

    let outcome = RenderOutcome {
        shapes: rendered.shapes,
        width: rendered.pixmap.width(),
        height: rendered.pixmap.height(),
    };
    log::info!(
        "wrote {} ({} shapes, {}x{}, seed {})",
        path.display(),
        outcome.shapes,
        outcome.width,
        outcome.height,
        seed.seed
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_name_every_listed_style_succeeds() {
        for name in GeneratorKind::list_generators() {
            assert!(GeneratorKind::from_name(name, &json!({})).is_ok(), "{name}");
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = GeneratorKind::from_name("spirals", &json!({}));
        assert!(matches!(result, Err(EngineError::UnknownStyle(name)) if name == "spirals"));
    }

    #[test]
    fn list_generators_has_all_six() {
        let names = GeneratorKind::list_generators();
        assert_eq!(names.len(), 6);
        for name in ["noise", "radial", "squares", "polygons", "triangles", "rectangles"] {
            assert!(names.contains(&name));
        }
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let generator = GeneratorKind::from_name("noise", &json!({"texture_lines": 3})).unwrap();
        assert_eq!(generator.params()["texture_lines"], 3);
        assert!(generator.param_schema().get("fan_probability").is_some());
        let generator = GeneratorKind::from_name("squares", &json!({})).unwrap();
        assert_eq!(generator.frame().x_min, -1.0);
    }

    #[test]
    fn render_reports_shape_count() {
        let seed = Seed::new("radial", 5).with_dpi(20);
        let rendered = render(&seed).unwrap();
        assert_eq!(rendered.shapes, 500);
    }

    #[test]
    fn render_rejects_zero_dpi() {
        let seed = Seed::new("radial", 5).with_dpi(0);
        assert!(matches!(render(&seed), Err(EngineError::InvalidDimensions)));
    }

    #[test]
    fn render_rejects_huge_dpi_before_allocating() {
        let seed = Seed::new("radial", 5).with_dpi(100_000);
        assert!(matches!(render(&seed), Err(EngineError::InvalidDimensions)));
    }

    #[test]
    fn determinism_same_seed() {
        let seed = Seed::new("triangles", 99).with_dpi(20);
        let a = render(&seed).unwrap();
        let b = render(&seed).unwrap();
        assert_eq!(a.pixmap.data(), b.pixmap.data());
    }

    #[test]
    fn different_seeds_differ() {
        let a = render(&Seed::new("noise", 1).with_dpi(20)).unwrap();
        let b = render(&Seed::new("noise", 2).with_dpi(20)).unwrap();
        assert_ne!(a.pixmap.data(), b.pixmap.data());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(8))]

            #[test]
            fn same_recipe_same_pixels(style in 0usize..6, seed: u64) {
                let name = GeneratorKind::list_generators()[style];
                let recipe = Seed::new(name, seed).with_dpi(10);
                let a = render(&recipe).unwrap();
                let b = render(&recipe).unwrap();
                prop_assert_eq!(a.shapes, b.shapes);
                prop_assert_eq!(a.pixmap.data(), b.pixmap.data());
            }
        }
    }

    #[cfg(feature = "png")]
    mod png {
        use super::*;

        fn corner_rgb(path: &std::path::Path) -> [u8; 3] {
            image::open(path).unwrap().to_rgb8().get_pixel(0, 0).0
        }

        #[test]
        fn radial_on_blue_has_blue_corner() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("radial.png");
            let seed = Seed::new("radial", 42)
                .with_background("blue")
                .unwrap()
                .with_dpi(50);

            let outcome = render_to_path(&seed, &path).unwrap();

            assert!(std::fs::metadata(&path).unwrap().len() > 0);
            assert_eq!(corner_rgb(&path), [0, 0, 255]);
            assert_eq!(outcome.shapes, 500);
            let img = image::open(&path).unwrap();
            assert_eq!((img.width(), img.height()), (outcome.width, outcome.height));
        }

        #[test]
        fn noise_on_rgb_background_succeeds() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("noise.png");
            let seed = Seed::new("noise", 7)
                .with_background("255,0,0")
                .unwrap()
                .with_dpi(30);

            render_to_path(&seed, &path).unwrap();
            assert_eq!(corner_rgb(&path), [255, 0, 0]);
        }

        #[test]
        fn bad_background_writes_nothing() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("noise.png");

            let result = Seed::new("noise", 7)
                .with_background("999,0,0")
                .and_then(|seed| render_to_path(&seed, &path));

            assert!(matches!(result, Err(EngineError::InvalidColorFormat(_))));
            assert!(!path.exists());
        }

        #[test]
        fn unknown_style_writes_nothing() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("out.png");
            let result = render_to_path(&Seed::new("spirals", 1).with_dpi(20), &path);
            assert!(matches!(result, Err(EngineError::UnknownStyle(_))));
            assert!(!path.exists());
        }

        #[test]
        fn unwritable_path_is_output_failure() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("missing").join("out.png");
            let result = render_to_path(&Seed::new("squares", 1).with_dpi(20), &path);
            assert!(matches!(result, Err(EngineError::OutputWriteFailure { .. })));
        }

        #[test]
        fn same_recipe_same_bytes() {
            let dir = tempfile::tempdir().unwrap();
            let a = dir.path().join("a.png");
            let b = dir.path().join("b.png");
            let seed = Seed::new("polygons", 1234)
                .with_background("skyblue")
                .unwrap()
                .with_dpi(30);

            render_to_path(&seed, &a).unwrap();
            render_to_path(&seed, &b).unwrap();
            assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
        }

        #[test]
        fn every_style_renders() {
            let dir = tempfile::tempdir().unwrap();
            for name in GeneratorKind::list_generators() {
                let path = dir.path().join(format!("{name}.png"));
                let outcome = render_to_path(&Seed::new(name, 3).with_dpi(15), &path).unwrap();
                assert!(outcome.width > 0 && outcome.height > 0, "{name}");
                assert!(path.exists(), "{name}");
            }
        }
    }
}
