use std::env;
use std::fmt::Write as _;
use std::fs;

use anyhow::{anyhow, Context, Result};
use log::info;

use elmjr_uniforms::{
    validate_fragment, BezierVertexUniforms, Light, PrimitiveFragmentUniforms,
    PrimitiveVertexUniforms, SceneLighting, UniformLayout,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    match CliOptions::parse()? {
        CliOptions::Layout => {
            print_layout::<Light>();
            print_layout::<PrimitiveVertexUniforms>();
            print_layout::<PrimitiveFragmentUniforms>();
            print_layout::<BezierVertexUniforms>();
            Ok(())
        }
        CliOptions::Encode { path } => encode_scene(&path),
    }
}

fn print_layout<T: UniformLayout>() {
    println!("{} ({} bytes)", T::NAME, T::size());
    for field in T::fields() {
        println!(
            "  {:>4}  {:<18} {:<12} {} bytes",
            field.offset, field.name, field.wgsl_type, field.size
        );
    }
}

fn encode_scene(path: &str) -> Result<()> {
    let xml = fs::read_to_string(path).with_context(|| format!("failed to read scene {path}"))?;
    let scene = SceneLighting::from_xml(&xml).context("failed to parse scene XML")?;
    let fragment = scene.fragment_uniforms();
    validate_fragment(&fragment, &scene.lights).context("scene lighting is inconsistent")?;
    info!("encoding {} light(s) from {path}", scene.lights.len());

    println!(
        "Loaded scene with {} light(s) (surface {})",
        scene.lights.len(),
        scene.surface_type
    );
    println!("{}: {}", PrimitiveFragmentUniforms::NAME, hex(fragment.as_bytes()));
    for (index, light) in scene.lights.iter().enumerate() {
        println!("Light[{index}] {}: {}", light.light_type, hex(light.as_bytes()));
    }
    println!("Encoded {} light(s)", scene.lights.len());
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

enum CliOptions {
    Layout,
    Encode { path: String },
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let usage = || anyhow!("Usage: elmjr-uniforms layout | elmjr-uniforms encode <scene.xml>");
        let command = args.next().ok_or_else(usage)?;
        let options = match command.as_str() {
            "layout" => Self::Layout,
            "encode" => Self::Encode {
                path: args.next().ok_or_else(usage)?,
            },
            other => {
                return Err(anyhow!(
                    "Unknown command: {other}. Expected `layout` or `encode`"
                ));
            }
        };
        if let Some(extra) = args.next() {
            return Err(anyhow!("Unexpected argument: {extra}"));
        }
        Ok(options)
    }
}
