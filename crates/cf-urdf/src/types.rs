//! Canonical typed robot model.
//!
//! These types are the normalized view of a URDF document. They mirror the
//! URDF XML schema closely, keep every optional element optional, and never
//! refer back to the XML they came from.

use nalgebra::UnitQuaternion;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Primitives
// ============================================================================

/// Floating-point triple used for positions, axes, box sizes and mesh scales.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// Create a vector from components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// `{1, 1, 1}`, the neutral mesh scale.
    #[must_use]
    pub const fn ones() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// The unit X axis, the default joint axis.
    #[must_use]
    pub const fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Ordered `[r, g, b, a]` color quadruple.
pub type Rgba = [f64; 4];

/// Opaque black, the fallback color.
pub const DEFAULT_RGBA: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Pose from an `<origin>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Origin {
    /// Position in meters.
    pub xyz: Vector3,
    /// Fixed-axis roll, pitch, yaw in radians.
    pub rpy: Vector3,
}

impl Origin {
    /// Create from position and rpy.
    #[must_use]
    pub const fn new(xyz: Vector3, rpy: Vector3) -> Self {
        Self { xyz, rpy }
    }

    /// Convert rpy to quaternion.
    ///
    /// URDF uses fixed-axis XYZ (roll about X, then pitch about Y, then yaw about Z).
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.rpy.x, self.rpy.y, self.rpy.z)
    }
}

// ============================================================================
// Inertial Properties
// ============================================================================

/// `<mass>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mass {
    /// Mass in kg.
    pub value: f64,
}

/// Upper-triangular elements of the inertia tensor.
///
/// Values are taken as written; symmetry and positive-definiteness are not
/// checked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inertia {
    /// Moment of inertia about X axis.
    pub ixx: f64,
    /// Product of inertia XY.
    pub ixy: f64,
    /// Product of inertia XZ.
    pub ixz: f64,
    /// Moment of inertia about Y axis.
    pub iyy: f64,
    /// Product of inertia YZ.
    pub iyz: f64,
    /// Moment of inertia about Z axis.
    pub izz: f64,
}

/// `<inertial>` element. Each part is kept only if it was present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inertial {
    /// Inertial frame relative to the link frame.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub origin: Option<Origin>,
    /// Mass.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub mass: Option<Mass>,
    /// Inertia tensor.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub inertia: Option<Inertia>,
}

// ============================================================================
// Geometry
// ============================================================================

/// `<box>` shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxGeometry {
    /// Size in x, y, z dimensions.
    pub size: Vector3,
}

/// `<cylinder>` shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CylinderGeometry {
    /// Radius in meters.
    pub radius: f64,
    /// Length in meters.
    pub length: f64,
}

/// `<sphere>` shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereGeometry {
    /// Radius in meters.
    pub radius: f64,
}

/// `<mesh>` reference.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshGeometry {
    /// Mesh path or URI, unresolved.
    pub filename: String,
    /// Scale, present only when the source carried a `scale` attribute.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub scale: Option<Vector3>,
}

/// `<geometry>` element.
///
/// Each shape field is filled independently from the source, so a malformed
/// document may populate several. Use [`Geometry::shape`] for the tagged view.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry {
    /// Box shape.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "box", skip_serializing_if = "Option::is_none", default)
    )]
    pub box_shape: Option<BoxGeometry>,
    /// Cylinder shape.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub cylinder: Option<CylinderGeometry>,
    /// Sphere shape.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub sphere: Option<SphereGeometry>,
    /// Mesh reference.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub mesh: Option<MeshGeometry>,
}

/// Tagged view of one populated geometry field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// Box shape.
    Box(&'a BoxGeometry),
    /// Cylinder shape.
    Cylinder(&'a CylinderGeometry),
    /// Sphere shape.
    Sphere(&'a SphereGeometry),
    /// Mesh reference.
    Mesh(&'a MeshGeometry),
}

impl Geometry {
    /// The first populated shape, checked in box, cylinder, sphere, mesh order.
    #[must_use]
    pub fn shape(&self) -> Option<Shape<'_>> {
        self.shapes().next()
    }

    /// All populated shapes.
    pub fn shapes(&self) -> impl Iterator<Item = Shape<'_>> {
        [
            self.box_shape.as_ref().map(Shape::Box),
            self.cylinder.as_ref().map(Shape::Cylinder),
            self.sphere.as_ref().map(Shape::Sphere),
            self.mesh.as_ref().map(Shape::Mesh),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether no shape was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shape().is_none()
    }
}

// ============================================================================
// Materials
// ============================================================================

/// `<color>` element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// RGBA components.
    pub rgba: Rgba,
}

impl Default for Color {
    fn default() -> Self {
        Self { rgba: DEFAULT_RGBA }
    }
}

/// `<texture>` element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Texture {
    /// Texture path, unresolved.
    pub filename: String,
}

/// `<material>` element, either a root-level definition or inline in a visual.
///
/// An inline material that only names a root definition carries just `name`;
/// see [`crate::Robot::resolve_material`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Material name.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub name: Option<String>,
    /// Color.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub color: Option<Color>,
    /// Texture.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub texture: Option<Texture>,
}

// ============================================================================
// Visual and Collision
// ============================================================================

/// `<visual>` element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Visual {
    /// Optional name.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub name: Option<String>,
    /// Origin relative to link frame.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub origin: Option<Origin>,
    /// Geometry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub geometry: Option<Geometry>,
    /// Inline material.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub material: Option<Material>,
}

/// `<collision>` element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collision {
    /// Optional name.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub name: Option<String>,
    /// Origin relative to link frame.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub origin: Option<Origin>,
    /// Geometry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub geometry: Option<Geometry>,
}

// ============================================================================
// Link
// ============================================================================

/// A link (rigid body) from `<link>` element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Link {
    /// Link name, never empty.
    pub name: String,
    /// Inertial properties.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub inertial: Option<Inertial>,
    /// Visual elements, possibly empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visuals: Vec<Visual>,
    /// Collision elements, possibly empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub collisions: Vec<Collision>,
}

impl Link {
    /// Create a new link with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Joint
// ============================================================================

/// Joint type from URDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum JointType {
    /// Revolute joint with limits.
    Revolute,
    /// Continuous (unlimited revolute) joint.
    Continuous,
    /// Prismatic (sliding) joint.
    Prismatic,
    /// Fixed (welded) joint.
    Fixed,
    /// Floating (6-DOF) joint.
    Floating,
    /// Planar (2D translation + rotation) joint.
    Planar,
}

impl JointType {
    /// Parse joint type from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "revolute" => Some(Self::Revolute),
            "continuous" => Some(Self::Continuous),
            "prismatic" => Some(Self::Prismatic),
            "fixed" => Some(Self::Fixed),
            "floating" => Some(Self::Floating),
            "planar" => Some(Self::Planar),
            _ => None,
        }
    }

    /// The URDF spelling of this type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revolute => "revolute",
            Self::Continuous => "continuous",
            Self::Prismatic => "prismatic",
            Self::Fixed => "fixed",
            Self::Floating => "floating",
            Self::Planar => "planar",
        }
    }

    /// Get degrees of freedom for this joint type.
    #[must_use]
    pub fn dof(&self) -> usize {
        match self {
            Self::Fixed => 0,
            Self::Revolute | Self::Continuous | Self::Prismatic => 1,
            Self::Planar => 3,
            Self::Floating => 6,
        }
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<parent>` or `<child>` element of a joint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkRef {
    /// Referenced link name.
    pub link: String,
}

/// `<axis>` element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Axis {
    /// Axis direction in the joint frame, as written (not normalized).
    pub xyz: Vector3,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            xyz: Vector3::x_axis(),
        }
    }
}

/// Joint limits from `<limit>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointLimit {
    /// Lower position limit (rad or m).
    pub lower: f64,
    /// Upper position limit (rad or m).
    pub upper: f64,
    /// Maximum effort (N or Nm).
    pub effort: f64,
    /// Maximum velocity (rad/s or m/s).
    pub velocity: f64,
}

/// Joint dynamics from `<dynamics>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointDynamics {
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Static friction (Coulomb).
    pub friction: f64,
}

/// Reference positions from `<calibration>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointCalibration {
    /// Position at which the rising edge of the reference triggers.
    pub rising: f64,
    /// Position at which the falling edge of the reference triggers.
    pub falling: f64,
}

/// `<mimic>` element: `value = multiplier * other + offset`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointMimic {
    /// Name of the mimicked joint.
    pub joint: String,
    /// Multiplier (default 1).
    pub multiplier: f64,
    /// Offset (default 0).
    pub offset: f64,
}

impl JointMimic {
    /// Position of this joint given the mimicked joint's position.
    #[must_use]
    pub fn apply(&self, position: f64) -> f64 {
        self.multiplier * position + self.offset
    }
}

/// A joint connecting two links.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Joint name.
    pub name: String,
    /// Joint type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub joint_type: JointType,
    /// Parent link.
    pub parent: LinkRef,
    /// Child link.
    pub child: LinkRef,
    /// Joint frame relative to the parent link frame.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub origin: Option<Origin>,
    /// Joint axis.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub axis: Option<Axis>,
    /// Limits.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub limit: Option<JointLimit>,
    /// Dynamics.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub dynamics: Option<JointDynamics>,
    /// Calibration.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub calibration: Option<JointCalibration>,
    /// Mimic.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub mimic: Option<JointMimic>,
}

impl Joint {
    /// Create a new joint without optional elements.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        joint_type: JointType,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            parent: LinkRef {
                link: parent.into(),
            },
            child: LinkRef { link: child.into() },
            origin: None,
            axis: None,
            limit: None,
            dynamics: None,
            calibration: None,
            mimic: None,
        }
    }
}

// ============================================================================
// Transmission
// ============================================================================

/// `<joint>` element of a transmission.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransmissionJoint {
    /// Joint name.
    pub name: String,
    /// `<hardwareInterface>` entries.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty", default))]
    pub hardware_interfaces: Vec<String>,
}

/// `<actuator>` element of a transmission.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Actuator {
    /// Actuator name.
    pub name: String,
    /// `<mechanicalReduction>` text content.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub mechanical_reduction: Option<f64>,
    /// `<hardwareInterface>` entries.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty", default))]
    pub hardware_interfaces: Vec<String>,
}

/// `<transmission>` element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transmission {
    /// Transmission name.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub name: Option<String>,
    /// `<type>` text content, empty if absent.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub transmission_type: String,
    /// Driven joint.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub joint: Option<TransmissionJoint>,
    /// Driving actuator.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub actuator: Option<Actuator>,
}

// ============================================================================
// Robot
// ============================================================================

/// A complete normalized URDF robot.
///
/// Collections are always present and keep source document order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Robot {
    /// Robot name, empty if absent.
    pub name: String,
    /// Valid links.
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Vec<Link>,
    /// Valid joints.
    #[cfg_attr(feature = "serde", serde(default))]
    pub joints: Vec<Joint>,
    /// Transmissions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transmissions: Vec<Transmission>,
    /// Root-level material definitions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub materials: Vec<Material>,
}

impl Robot {
    /// Create a new robot with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a link.
    #[must_use]
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Add a joint.
    #[must_use]
    pub fn with_joint(mut self, joint: Joint) -> Self {
        self.joints.push(joint);
        self
    }

    /// Get a link by name.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Get a joint by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// Get a root-level material by name.
    #[must_use]
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }

    /// Get a transmission by name.
    #[must_use]
    pub fn transmission(&self, name: &str) -> Option<&Transmission> {
        self.transmissions
            .iter()
            .find(|t| t.name.as_deref() == Some(name))
    }

    /// Get all link names.
    pub fn link_names(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|l| l.name.as_str())
    }

    /// Get all joint names.
    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.joints.iter().map(|j| j.name.as_str())
    }

    /// Look up the root-level definition an inline material refers to.
    ///
    /// Parsing never does this on its own. Returns `None` when the inline
    /// material has no name or no root material carries it.
    #[must_use]
    pub fn resolve_material(&self, inline: &Material) -> Option<&Material> {
        inline.name.as_deref().and_then(|name| self.material(name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_rotation() {
        let origin = Origin::new(
            Vector3::zeros(),
            Vector3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2),
        );
        let rotated = origin.rotation() * nalgebra::Vector3::x();
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_vector_nalgebra_conversion() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let n: nalgebra::Vector3<f64> = v.into();
        assert_relative_eq!(n.norm_squared(), 14.0);
        assert_eq!(Vector3::from(n), v);
    }

    #[test]
    fn test_joint_type_round_trip_names() {
        for t in [
            JointType::Revolute,
            JointType::Continuous,
            JointType::Prismatic,
            JointType::Fixed,
            JointType::Floating,
            JointType::Planar,
        ] {
            assert_eq!(JointType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(JointType::from_str("ball"), None);
        assert_eq!(JointType::Planar.to_string(), "planar");
    }

    #[test]
    fn test_joint_type_dof() {
        assert_eq!(JointType::Fixed.dof(), 0);
        assert_eq!(JointType::Revolute.dof(), 1);
        assert_eq!(JointType::Planar.dof(), 3);
        assert_eq!(JointType::Floating.dof(), 6);
    }

    #[test]
    fn test_geometry_shape_view() {
        let geometry = Geometry {
            sphere: Some(SphereGeometry { radius: 0.5 }),
            mesh: Some(MeshGeometry {
                filename: "a.stl".into(),
                scale: None,
            }),
            ..Geometry::default()
        };
        assert!(matches!(geometry.shape(), Some(Shape::Sphere(s)) if s.radius == 0.5));
        assert_eq!(geometry.shapes().count(), 2);
        assert!(Geometry::default().is_empty());
    }

    #[test]
    fn test_mimic_apply() {
        let mimic = JointMimic {
            joint: "j".into(),
            multiplier: -2.0,
            offset: 0.5,
        };
        assert_relative_eq!(mimic.apply(1.0), -1.5);
    }

    #[test]
    fn test_resolve_material_by_name() {
        let mut robot = Robot::new("r");
        robot.materials.push(Material {
            name: Some("blue".into()),
            color: Some(Color {
                rgba: [0.0, 0.0, 1.0, 1.0],
            }),
            texture: None,
        });
        let inline = Material {
            name: Some("blue".into()),
            ..Material::default()
        };
        let resolved = robot.resolve_material(&inline).unwrap();
        assert_eq!(resolved.color.unwrap().rgba, [0.0, 0.0, 1.0, 1.0]);
        assert!(robot.resolve_material(&Material::default()).is_none());
    }

    #[test]
    fn test_robot_builder() {
        let robot = Robot::new("test_robot")
            .with_link(Link::new("base_link"))
            .with_link(Link::new("link1"))
            .with_joint(Joint::new(
                "joint1",
                JointType::Revolute,
                "base_link",
                "link1",
            ));

        assert_eq!(robot.links.len(), 2);
        assert!(robot.link("base_link").is_some());
        assert!(robot.joint("joint1").is_some());
        assert_eq!(robot.link_names().collect::<Vec<_>>(), ["base_link", "link1"]);
    }
}
