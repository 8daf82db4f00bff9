use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use log::debug;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::types::{Light, LightType, PrimitiveFragmentUniforms, SurfaceType};

/// Lighting inputs of a scene: the camera position, the surface mode and the
/// ordered light list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneLighting {
    pub camera_position: Vec3,
    pub surface_type: SurfaceType,
    pub lights: Vec<Light>,
}

impl SceneLighting {
    /// Parses a scene lighting description.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid scene XML")?;
        let root = document.root_element();

        let camera_position = match root.children().find(|n| n.has_tag_name("camera")) {
            Some(camera) => parse_vec3(optional_text(&camera, "position"), Vec3::ZERO)
                .context("invalid camera position")?,
            None => Vec3::ZERO,
        };

        let surface_type = match optional_text(&root, "surface") {
            Some(name) => name.parse::<SurfaceType>()?,
            None => SurfaceType::UNLIT,
        };

        let lights = root
            .children()
            .filter(|n| n.has_tag_name("light"))
            .enumerate()
            .map(|(index, node)| {
                parse_light(&node).with_context(|| format!("invalid light #{}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "parsed scene lighting: {} light(s), surface {surface_type}",
            lights.len()
        );

        Ok(Self {
            camera_position,
            surface_type,
            lights,
        })
    }

    /// Fragment uniforms whose light count covers exactly the parsed lights.
    pub fn fragment_uniforms(&self) -> PrimitiveFragmentUniforms {
        PrimitiveFragmentUniforms::new(
            self.lights.len() as u32,
            self.camera_position,
            self.surface_type,
        )
    }
}

fn parse_light(node: &Node<'_, '_>) -> Result<Light> {
    let light_type = required_text(node, "type")?.parse::<LightType>()?;
    let color = parse_vec3(optional_text(node, "color"), Vec3::ONE).context("invalid color")?;
    let intensity = parse_f32(optional_text(node, "intensity"), 1.0)?;
    let light = match light_type {
        LightType::AMBIENT => Light::ambient(color, intensity),
        _ => {
            let position = parse_vec3(optional_text(node, "position"), Vec3::ZERO)
                .context("invalid position")?;
            Light::new(position, color, intensity, light_type)
        }
    };
    Ok(light)
}

fn required_text(node: &Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| anyhow!("<{tag}> tag is missing"))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_vec3(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    let components = value
        .split_whitespace()
        .map(|component| {
            component
                .parse::<f32>()
                .map_err(|err| anyhow!("bad component `{component}`: {err}"))
        })
        .collect::<Result<Vec<_>>>()?;
    match components.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(anyhow!(
            "vector needs 3 components, found {}",
            components.len()
        )),
    }
}

fn parse_f32(value: Option<String>, default: f32) -> Result<f32> {
    match value {
        Some(value) => value
            .parse::<f32>()
            .map_err(|err| anyhow!("failed to parse float: {err}")),
        None => Ok(default),
    }
}
