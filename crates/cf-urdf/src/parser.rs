//! URDF tree normalizer.
//!
//! Walks the attributed XML tree and builds the canonical [`Robot`]. Every
//! repeated-or-single element goes through [`ensure_array`] exactly once, here,
//! so the conversion routines below never inspect tree shapes themselves.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::coerce::{ensure_array, get_attribute, get_text, parse_number, parse_rgba, parse_vector3};
use crate::error::{Result, UrdfError};
use crate::options::ParserOptions;
use crate::types::{
    Actuator, Axis, BoxGeometry, Collision, Color, CylinderGeometry, DEFAULT_RGBA, Geometry,
    Inertia, Inertial, Joint, JointCalibration, JointDynamics, JointLimit, JointMimic, JointType,
    Link, LinkRef, Mass, Material, MeshGeometry, Origin, Robot, SphereGeometry, Texture,
    Transmission, TransmissionJoint, Vector3, Visual,
};
use crate::xml::{XmlNode, XmlOptions, XmlValue, build_tree};

/// Mechanical reduction assumed when `<mechanicalReduction>` has no usable number.
const DEFAULT_MECHANICAL_REDUCTION: f64 = 1.0;

/// Parse a URDF string with default options.
///
/// # Errors
///
/// Returns an error if the XML is malformed or has no `robot` root element.
pub fn parse_urdf_str(xml: &str) -> Result<Robot> {
    UrdfParser::default().parse_str(xml)
}

/// Parse a URDF file with default options.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn parse_urdf_file(path: impl AsRef<Path>) -> Result<Robot> {
    UrdfParser::default().parse_file(path)
}

/// URDF parser with configuration options.
#[derive(Debug, Clone, Default)]
pub struct UrdfParser {
    options: ParserOptions,
}

impl UrdfParser {
    /// Create a parser with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse URDF from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Robot> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parse URDF from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed or has no `robot` root element.
    pub fn parse_str(&self, xml: &str) -> Result<Robot> {
        let document = build_tree(xml, &self.options.xml)?;
        self.parse_document(&document)
    }

    /// Normalize an already built document tree.
    ///
    /// The tree must follow the key conventions of this parser's
    /// [`XmlOptions`].
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no `robot` root element.
    pub fn parse_document(&self, document: &XmlNode) -> Result<Robot> {
        let robot = ensure_array(document.get("robot"))
            .first()
            .ok_or_else(|| UrdfError::missing_element("robot", "URDF document"))?;
        Ok(Normalizer::new(&self.options.xml).robot(robot))
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Per-entity conversion routines, parameterized by the tree's key conventions.
struct Normalizer<'a> {
    keys: &'a XmlOptions,
}

impl<'a> Normalizer<'a> {
    fn new(keys: &'a XmlOptions) -> Self {
        Self { keys }
    }

    fn attr<'n>(&self, node: &'n XmlValue, name: &str) -> Option<&'n str> {
        get_attribute(Some(node), name, &self.keys.attribute_prefix)
    }

    fn number(&self, node: &XmlValue, name: &str, default: f64) -> f64 {
        parse_number(self.attr(node, name), default)
    }

    fn text(&self, node: Option<&XmlValue>) -> Option<String> {
        get_text(node, &self.keys.text_key).map(|t| t.trim().to_string())
    }

    /// All children named `name`, in document order.
    fn each<'n>(&self, node: &'n XmlValue, name: &str) -> std::slice::Iter<'n, XmlValue> {
        ensure_array(node.child(name)).iter()
    }

    /// The first child named `name`.
    fn first<'n>(&self, node: &'n XmlValue, name: &str) -> Option<&'n XmlValue> {
        ensure_array(node.child(name)).first()
    }

    fn robot(&self, node: &XmlValue) -> Robot {
        let robot = Robot {
            name: self.attr(node, "name").unwrap_or_default().to_string(),
            links: self
                .each(node, "link")
                .filter_map(|l| self.link(l))
                .collect(),
            joints: self
                .each(node, "joint")
                .filter_map(|j| self.joint(j))
                .collect(),
            transmissions: self
                .each(node, "transmission")
                .map(|t| self.transmission(t))
                .collect(),
            materials: self
                .each(node, "material")
                .map(|m| self.material(m))
                .collect(),
        };

        debug!(
            robot = %robot.name,
            links = robot.links.len(),
            joints = robot.joints.len(),
            materials = robot.materials.len(),
            transmissions = robot.transmissions.len(),
            "normalized URDF"
        );
        robot
    }

    fn link(&self, node: &XmlValue) -> Option<Link> {
        let Some(name) = self.attr(node, "name").filter(|n| !n.is_empty()) else {
            warn!("skipping <link> without a name");
            return None;
        };

        Some(Link {
            name: name.to_string(),
            inertial: self.first(node, "inertial").map(|i| self.inertial(i)),
            visuals: self.each(node, "visual").map(|v| self.visual(v)).collect(),
            collisions: self
                .each(node, "collision")
                .map(|c| self.collision(c))
                .collect(),
        })
    }

    fn origin(&self, node: &XmlValue) -> Option<Origin> {
        self.first(node, "origin").map(|o| Origin {
            xyz: parse_vector3(self.attr(o, "xyz"), Vector3::zeros()),
            rpy: parse_vector3(self.attr(o, "rpy"), Vector3::zeros()),
        })
    }

    fn inertial(&self, node: &XmlValue) -> Inertial {
        Inertial {
            origin: self.origin(node),
            mass: self.first(node, "mass").map(|m| Mass {
                value: self.number(m, "value", 0.0),
            }),
            inertia: self.first(node, "inertia").map(|i| Inertia {
                ixx: self.number(i, "ixx", 0.0),
                ixy: self.number(i, "ixy", 0.0),
                ixz: self.number(i, "ixz", 0.0),
                iyy: self.number(i, "iyy", 0.0),
                iyz: self.number(i, "iyz", 0.0),
                izz: self.number(i, "izz", 0.0),
            }),
        }
    }

    fn visual(&self, node: &XmlValue) -> Visual {
        Visual {
            name: self.attr(node, "name").map(String::from),
            origin: self.origin(node),
            geometry: self.first(node, "geometry").map(|g| self.geometry(g)),
            material: self.first(node, "material").map(|m| self.material(m)),
        }
    }

    fn collision(&self, node: &XmlValue) -> Collision {
        Collision {
            name: self.attr(node, "name").map(String::from),
            origin: self.origin(node),
            geometry: self.first(node, "geometry").map(|g| self.geometry(g)),
        }
    }

    fn geometry(&self, node: &XmlValue) -> Geometry {
        Geometry {
            box_shape: self.first(node, "box").map(|b| BoxGeometry {
                size: parse_vector3(self.attr(b, "size"), Vector3::zeros()),
            }),
            cylinder: self.first(node, "cylinder").map(|c| CylinderGeometry {
                radius: self.number(c, "radius", 0.0),
                length: self.number(c, "length", 0.0),
            }),
            sphere: self.first(node, "sphere").map(|s| SphereGeometry {
                radius: self.number(s, "radius", 0.0),
            }),
            mesh: self.first(node, "mesh").map(|m| MeshGeometry {
                filename: self.attr(m, "filename").unwrap_or_default().to_string(),
                scale: self
                    .attr(m, "scale")
                    .map(|s| parse_vector3(Some(s), Vector3::ones())),
            }),
        }
    }

    fn material(&self, node: &XmlValue) -> Material {
        Material {
            name: self.attr(node, "name").map(String::from),
            color: self.first(node, "color").map(|c| Color {
                rgba: parse_rgba(self.attr(c, "rgba"), DEFAULT_RGBA),
            }),
            texture: self.first(node, "texture").map(|t| Texture {
                filename: self.attr(t, "filename").unwrap_or_default().to_string(),
            }),
        }
    }

    fn joint(&self, node: &XmlValue) -> Option<Joint> {
        let Some(name) = self.attr(node, "name").filter(|n| !n.is_empty()) else {
            warn!("skipping <joint> without a name");
            return None;
        };
        let Some(type_str) = self.attr(node, "type") else {
            warn!(joint = name, "skipping <joint> without a type");
            return None;
        };
        let Some(joint_type) = JointType::from_str(type_str) else {
            warn!(joint = name, joint_type = type_str, "skipping <joint> of unknown type");
            return None;
        };
        let Some(parent) = self.link_ref(node, "parent") else {
            warn!(joint = name, "skipping <joint> without a parent link");
            return None;
        };
        let Some(child) = self.link_ref(node, "child") else {
            warn!(joint = name, "skipping <joint> without a child link");
            return None;
        };

        Some(Joint {
            name: name.to_string(),
            joint_type,
            parent,
            child,
            origin: self.origin(node),
            axis: self.first(node, "axis").map(|a| Axis {
                xyz: parse_vector3(self.attr(a, "xyz"), Vector3::x_axis()),
            }),
            limit: self.first(node, "limit").map(|l| JointLimit {
                lower: self.number(l, "lower", 0.0),
                upper: self.number(l, "upper", 0.0),
                effort: self.number(l, "effort", 0.0),
                velocity: self.number(l, "velocity", 0.0),
            }),
            dynamics: self.first(node, "dynamics").map(|d| JointDynamics {
                damping: self.number(d, "damping", 0.0),
                friction: self.number(d, "friction", 0.0),
            }),
            calibration: self.first(node, "calibration").map(|c| JointCalibration {
                rising: self.number(c, "rising", 0.0),
                falling: self.number(c, "falling", 0.0),
            }),
            mimic: self
                .first(node, "mimic")
                .and_then(|m| self.mimic(name, m)),
        })
    }

    fn link_ref(&self, node: &XmlValue, element: &str) -> Option<LinkRef> {
        let link = self
            .first(node, element)
            .and_then(|e| self.attr(e, "link"))
            .filter(|l| !l.is_empty())?;
        Some(LinkRef {
            link: link.to_string(),
        })
    }

    fn mimic(&self, joint: &str, node: &XmlValue) -> Option<JointMimic> {
        let Some(target) = self.attr(node, "joint") else {
            warn!(joint = joint, "ignoring <mimic> without a joint attribute");
            return None;
        };
        Some(JointMimic {
            joint: target.to_string(),
            multiplier: self.number(node, "multiplier", 1.0),
            offset: self.number(node, "offset", 0.0),
        })
    }

    fn transmission(&self, node: &XmlValue) -> Transmission {
        // Older files put the type in an attribute instead of a <type> element.
        let transmission_type = self
            .text(self.first(node, "type"))
            .or_else(|| self.attr(node, "type").map(String::from))
            .unwrap_or_default();

        Transmission {
            name: self.attr(node, "name").map(String::from),
            transmission_type,
            joint: self.first(node, "joint").map(|j| TransmissionJoint {
                name: self.attr(j, "name").unwrap_or_default().to_string(),
                hardware_interfaces: self.hardware_interfaces(j),
            }),
            actuator: self.first(node, "actuator").map(|a| Actuator {
                name: self.attr(a, "name").unwrap_or_default().to_string(),
                mechanical_reduction: self
                    .text(self.first(a, "mechanicalReduction"))
                    .map(|t| parse_number(Some(t.as_str()), DEFAULT_MECHANICAL_REDUCTION)),
                hardware_interfaces: self.hardware_interfaces(a),
            }),
        }
    }

    fn hardware_interfaces(&self, node: &XmlValue) -> Vec<String> {
        self.each(node, "hardwareInterface")
            .filter_map(|h| self.text(Some(h)))
            .filter(|t| !t.is_empty())
            .collect()
    }
}
