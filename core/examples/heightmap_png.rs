use diamond_square::utils::save_png;
use diamond_square::{DiamondSquare, GeneratorConfig};
use std::path::Path;

fn main() {
    // 257×257 heightmap with a fixed seed
    let config = GeneratorConfig {
        base: 8,
        amplitude: 6,
        seed: Some(2025),
        ..GeneratorConfig::default()
    };
    let grid = DiamondSquare::new(config).unwrap().generate().unwrap();

    let path = Path::new("heightmap.png");
    save_png(&grid, path).unwrap();
    println!("Saved {}x{} heightmap to {:?}", grid.size(), grid.size(), path);
}
