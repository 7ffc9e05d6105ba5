use clap::Parser;

use bonechain::{
    ChainConfig, DemoConfig, DemoScene, Label, RawGeometry, SkinnedMesh, World, skin_positions,
};

#[derive(clap::Parser)]
struct Opts {
    /// Number of bone segments in the chain.
    #[arg(long, default_value_t = 4)]
    segments: u32,

    /// Height of a single bone segment.
    #[arg(long, default_value_t = 8.0)]
    segment_height: f32,

    /// Base radius of the cone.
    #[arg(long, default_value_t = 5.0)]
    radius: f32,

    /// Number of animation ticks to simulate.
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Seconds of animation time per tick.
    #[arg(long, default_value_t = 0.1)]
    step: f32,
}

fn main() {
    tracing_subscriber::fmt().init();

    let opts = Opts::parse();

    let config = DemoConfig::new().chain(
        ChainConfig::new()
            .segments(opts.segments, opts.segment_height)
            .radius(opts.radius),
    );

    let scene = match DemoScene::build(&config) {
        Ok(scene) => scene,
        Err(err) => {
            tracing::error!("Could not build scene: {}", err);
            std::process::exit(1);
        }
    };

    let mut world = World::new();
    let entities = scene.register(&mut world);
    tracing::info!("Scene ready with {} entities", world.len());

    for frame in 0..opts.frames {
        let time = frame as f32 * opts.step;
        DemoScene::tick(&mut world, time);

        for (_, (label, geometry, skinned)) in
            world.query_mut::<(&Label, &RawGeometry, &SkinnedMesh)>()
        {
            let matrices = skinned.skeleton.bone_matrices();
            match skin_positions(&geometry.positions(), &skinned.binding, &matrices) {
                Ok(posed) => {
                    let tip = posed
                        .iter()
                        .copied()
                        .max_by(|a, b| a.y.total_cmp(&b.y))
                        .unwrap_or_default();
                    tracing::info!(frame, time, "{} tip at {:.2}", label.0, tip);
                }
                Err(err) => tracing::warn!("Could not pose {}: {}", label.0, err),
            }
        }
    }

    tracing::debug!(?entities, "Done");
}
