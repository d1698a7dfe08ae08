//! Citymesh import demo — imports an embedded city model and assigns a
//! few semantic surfaces.
//!
//! Usage:
//! ```text
//! cargo run --example import
//! RUST_LOG=citymesh=debug cargo run --example import
//! ```

use std::collections::BTreeMap;
use std::error::Error;

use serde::Deserialize;

use citymesh::document::{CityObject, Document, ImportObject};
use citymesh::math::Point3;
use citymesh::semantics::{AssignSurface, SemanticsPayload};

/// Minimal exchange-file shape: the global vertex pool plus named
/// objects. Ordered map so runs are deterministic.
#[derive(Debug, Deserialize)]
struct CityModel {
    vertices: Vec<[f64; 3]>,
    #[serde(rename = "CityObjects")]
    city_objects: BTreeMap<String, CityObject>,
}

const MODEL: &str = r#"{
    "vertices": [
        [0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 4.0, 0.0], [0.0, 4.0, 0.0],
        [0.0, 0.0, 3.0], [4.0, 0.0, 3.0], [4.0, 4.0, 3.0], [0.0, 4.0, 3.0]
    ],
    "CityObjects": {
        "box-house": {
            "type": "Building",
            "geometry": [{
                "type": "Solid",
                "boundaries": [[
                    [[0, 3, 2, 1]],
                    [[0, 1, 5, 4]],
                    [[1, 2, 6, 5]],
                    [[2, 3, 7, 6]],
                    [[3, 0, 4, 7]],
                    [[4, 5, 6, 7]]
                ]]
            }]
        }
    }
}"#;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for citymesh.
    // Override with RUST_LOG env var (e.g. RUST_LOG=citymesh=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("citymesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let model: CityModel = serde_json::from_str(MODEL)?;
    let pool = model
        .vertices
        .iter()
        .map(|&[x, y, z]| Point3::new(x, y, z))
        .collect();
    let mut document = Document::new(pool);

    for (name, object) in &model.city_objects {
        let id = ImportObject::new(name, object).execute(&mut document);

        let data = document.object(id)?;
        println!(
            "imported {name}: {} vertices, {} faces",
            data.mesh.vertex_count(),
            data.mesh.face_count()
        );
        for kind in document.surface_types(id)? {
            println!("  selectable: {kind}");
        }

        // Assign a ground floor, walls, and a window cut into one wall.
        AssignSurface::new(id, "GroundSurface", 0).execute(&mut document)?;
        for face in 1..5 {
            AssignSurface::new(id, "WallSurface", face).execute(&mut document)?;
        }
        AssignSurface::new(id, "RoofSurface", 5).execute(&mut document)?;
        AssignSurface::new(id, "Window", 2).execute(&mut document)?;

        let payload = SemanticsPayload::collect(document.object(id)?);
        println!("semantics: {}", serde_json::to_string_pretty(&payload)?);
    }

    let dirty = document.objects().filter(|(_, data)| data.dirty).count();
    println!("{dirty} object(s) pending export");

    Ok(())
}
