// Renders color bars through the filter as a quick visual smoke check

use secam_fire::{
    plugin::{param_info, plugin_info, ParamValue, SecamPlugin, FIRE_INTENSITY, NOISE_INTENSITY},
    video::Frame,
    SecamFilter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📺 secam-fire test pattern");

    // Test 1: Plugin metadata
    let info = plugin_info();
    println!("\n1. Plugin: {} by {} - {}", info.name, info.author, info.explanation);
    for index in 0..info.num_params {
        if let Some(param) = param_info(index) {
            println!("   param {}: {} ({:?})", index, param.name, param.kind);
        }
    }

    // Test 2: Source frame
    let (width, height) = (640, 480);
    let bars = Frame::color_bars(width, height);
    println!("\n2. Color bars: {}x{}", bars.width(), bars.height());

    // Test 3: Degrade at a few intensities
    println!("\n3. Rendering...");
    for (fire, noise) in [(0.125, 0.125), (0.6, 0.3), (1.0, 1.0)] {
        let mut plugin = SecamPlugin::from_filter(SecamFilter::with_seed(width, height, 2024)?);
        plugin.set_param(FIRE_INTENSITY, ParamValue::Double(fire))?;
        plugin.set_param(NOISE_INTENSITY, ParamValue::Double(noise))?;

        let mut output = Frame::new_black(width, height);
        plugin.update(0.0, bars.as_raw(), output.as_raw_mut())?;

        let path = format!("test_pattern_f{:.2}_n{:.2}.png", fire, noise);
        match output.save(&path) {
            Ok(()) => println!("   📁 fire {:.2}, noise {:.2} -> {}", fire, noise, path),
            Err(e) => println!("   ⚠️  Could not save {}: {}", path, e),
        }
    }

    println!("\n🎉 Done.");
    Ok(())
}
