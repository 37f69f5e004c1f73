use imgmap::{ImageInfo, ImageMapper, MapperConfig, Point, Recorder, Region, RegionMap, Size};
use std::time::Instant;

// Grid of alternating rects and circles, 10px cells authored at 2x.
fn build_grid_map(regions: usize) -> RegionMap {
    let cols = 100usize;
    let areas = (0..regions)
        .map(|k| {
            let (i, j) = ((k % cols) as f64, (k / cols) as f64);
            let (x, y) = (i * 20.0, j * 20.0);
            let r = if k % 2 == 0 {
                Region::new("rect", vec![x, y, x + 16.0, y + 16.0])
            } else {
                Region::new("circle", vec![x + 8.0, y + 8.0, 8.0])
            };
            r.with_id(format!("r{k}"))
        })
        .collect();
    RegionMap::new("grid", areas)
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut regions = 5000usize;
    let mut picks = 10000usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--regions=") { if let Ok(v)=val.parse() { regions=v; } }
        else if let Some(val)=a.strip_prefix("--picks=") { if let Ok(v)=val.parse() { picks=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let config = MapperConfig { width: 1000.0.into(), img_width: 2000.0, ..Default::default() };
    let mut m: ImageMapper<Recorder> = ImageMapper::new(config, build_grid_map(regions), ());
    let rows = regions.div_ceil(100) as f64;
    m.on_image_loaded(ImageInfo::new(Size::new(2000.0, rows * 20.0), Size::new(1000.0, rows * 10.0)));

    let mut times_ms: Vec<f64> = Vec::with_capacity(picks);
    let start_all = Instant::now();
    let mut hits = 0usize;
    for k in 0..picks {
        let x = (k % 100) as f64 * 10.0 + 4.1;
        let y = ((k / 100) as f64 % rows) * 10.0 + 3.9;
        let t0 = Instant::now();
        if m.area_at(Point::new(x, y)).is_some() { hits += 1; }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a, b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("regions={} picks={} hits={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}", regions, picks, hits, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
