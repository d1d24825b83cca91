use clap::{App, Arg, ArgMatches};
use log::{error, info, warn, LevelFilter};
use pbr::ProgressBar;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::{process, thread, time};
use voxtrace::demo::*;
use voxtrace::rng::*;
use voxtrace::threadpool::*;
use voxtrace::*;

fn main() {
    let arg_matches = App::new("voxtrace")
        .version("0.1.0")
        .author("Jean-Francois Roy <jf@devklog.net>")
        .about("Recursive Phong ray tracer with a voxel grid")
        .arg(
            Arg::new("resolution")
                .long("resolution")
                .short('r')
                .takes_value(true)
                .default_value("1200x800")
                .help("output resolution in pixels"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .short('s')
                .takes_value(true)
                .default_value("1")
                .help("jittered camera rays per pixel"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('e')
                .takes_value(true)
                .default_value("0")
                .help("rng seed for the random scene and the pixel jitter"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('j')
                .takes_value(true)
                .help("worker threads, one per logical CPU by default"),
        )
        .arg(
            Arg::new("grid")
                .long("grid")
                .short('g')
                .takes_value(true)
                .default_value("auto")
                .help("voxel grid resolution: a cell count per axis up to 256, 'auto' or 'off'"),
        )
        .arg(
            Arg::new("gloss")
                .long("gloss")
                .takes_value(true)
                .default_value("1")
                .help("rays per side of glossy and frosted bundles"),
        )
        .arg(
            Arg::new("scene")
                .long("scene")
                .takes_value(true)
                .possible_values(["showcase", "random"])
                .default_value("showcase")
                .help("scene to render"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .takes_value(true)
                .default_value("o.png")
                .help("output image, format picked from the extension"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("log debug messages"),
        )
        .get_matches();

    init_logger(arg_matches.is_present("verbose"));
    if let Err(e) = run(&arg_matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();
}

fn run(arg_matches: &ArgMatches) -> Result<()> {
    let (w, h) = parse_resolution(arg_matches.value_of("resolution"))
        .ok_or_else(|| usage("invalid resolution"))?;
    let spp: usize = parse_arg(arg_matches.value_of("samples"))
        .ok_or_else(|| usage("invalid sample count"))?;
    let seed: u64 =
        parse_arg(arg_matches.value_of("seed")).ok_or_else(|| usage("invalid rng seed"))?;
    let threads: Option<usize> = match arg_matches.value_of("threads") {
        Some(s) => Some(parse_arg(Some(s)).ok_or_else(|| usage("invalid thread count"))?),
        None => None,
    };
    let grid = parse_grid(arg_matches.value_of("grid")).ok_or_else(|| usage("invalid grid"))?;
    let gloss: usize = parse_arg(arg_matches.value_of("gloss"))
        .ok_or_else(|| usage("invalid gloss resolution"))?;
    let kind: DemoScene = arg_matches.value_of("scene").unwrap_or("showcase").parse()?;
    let output = arg_matches.value_of("output").unwrap_or("o.png");

    let started = time::Instant::now();
    let mut rng = RttRng::seed_from_u64(seed);
    let (scene, camera) = demo_scene(kind, w as f64 / h.max(1) as f64, grid, &mut rng)?;
    info!(
        "Built scene '{}' with {} geometries in {:.2?}.",
        scene.name,
        scene.geometries.len(),
        started.elapsed()
    );
    let tracer = RayTracer::new(&scene).with_sampler(Sampler::new(gloss)?);
    let options = RenderOptions {
        width: w,
        height: h,
        samples: spp,
        seed,
    };
    let pool = init_pool(threads)?;

    info!(
        "Rendering {} x {} image using {} samples per pixel.",
        w, h, spp
    );

    let pxcount = Arc::new(AtomicUsize::new(0));
    let done = Arc::new(AtomicBool::new(false));
    let ui_pxcount = Arc::clone(&pxcount);
    let ui_done = Arc::clone(&done);
    let ui_thread = thread::spawn(move || {
        let t = w * h;
        let mut pb = ProgressBar::new(t as u64);
        loop {
            let x = ui_pxcount.load(Ordering::Relaxed);
            pb.set(x as u64);
            if x >= t || ui_done.load(Ordering::Relaxed) {
                break;
            }
            thread::sleep(time::Duration::from_millis(250));
        }
        pb.finish();
    });

    let started = time::Instant::now();
    let pixels = pool.install(|| render(&tracer, &camera, &options, &pxcount));
    done.store(true, Ordering::Relaxed);
    if ui_thread.join().is_err() {
        warn!("progress display thread panicked");
    }
    let pixels = pixels?;
    info!("Rendered in {:.2?}.", started.elapsed());

    image::save_buffer(output, &pixels[..], w as u32, h as u32, image::ColorType::Rgb8)?;
    info!("Image saved as {}", output);
    Ok(())
}

fn usage(msg: &str) -> Error {
    Error::InvalidArgument(msg.to_string())
}

fn parse_resolution(s: Option<&str>) -> Option<(usize, usize)> {
    let v: Vec<&str> = s?.split('x').collect();
    if v.len() != 2 {
        return None;
    }
    let w = v[0].parse::<usize>().ok()?;
    let h = v[1].parse::<usize>().ok()?;
    Some((w, h))
}

fn parse_grid(s: Option<&str>) -> Option<Option<GridResolution>> {
    match s? {
        "off" => Some(None),
        "auto" => Some(Some(GridResolution::Auto)),
        n => Some(Some(GridResolution::Fixed(n.parse().ok()?))),
    }
}

fn parse_arg<T: std::str::FromStr>(s: Option<&str>) -> Option<T> {
    s?.parse::<T>().ok()
}
