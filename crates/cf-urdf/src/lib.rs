//! URDF robot description normalizer.
//!
//! This crate turns a [URDF](http://wiki.ros.org/urdf) (Unified Robot Description
//! Format) document into a strongly-typed [`Robot`] tree: links, joints,
//! root-level materials and transmissions, with consistent defaulting and
//! numeric parsing. Simulators, visualizers and kinematics solvers get
//! predictable structure without touching raw XML.
//!
//! # Pipeline
//!
//! ```text
//! URDF text ──► xml::build_tree ──► attributed tree ──► UrdfParser ──► Robot
//!                  (quick-xml)                            (coerce)
//! ```
//!
//! The attributed tree maps each element's child names to a single value or a
//! list of values. That one-or-many ambiguity is resolved at a single point,
//! [`coerce::ensure_array`], before any conversion routine sees it.
//!
//! No 3D math is applied to the parsed data. Values are exactly what the
//! document says.
//!
//! # Example
//!
//! ```
//! use cf_urdf::{parse_urdf_str, JointType};
//!
//! let urdf = r#"
//!     <robot name="simple">
//!         <link name="base_link"/>
//!         <link name="wheel"/>
//!         <link/>
//!         <joint name="base_to_wheel" type="continuous">
//!             <parent link="base_link"/>
//!             <child link="wheel"/>
//!             <axis xyz="0 1 0"/>
//!         </joint>
//!     </robot>
//! "#;
//!
//! let robot = parse_urdf_str(urdf).expect("should parse");
//! assert_eq!(robot.name, "simple");
//! // The unnamed link is dropped with a warning.
//! assert_eq!(robot.links.len(), 2);
//!
//! let joint = robot.joint("base_to_wheel").expect("joint exists");
//! assert_eq!(joint.joint_type, JointType::Continuous);
//! assert_eq!(joint.child.link, "wheel");
//! ```
//!
//! # Error handling
//!
//! Only two things abort a parse: XML that cannot be tokenized, and a document
//! without a `robot` root element. A link without a name, or a joint missing
//! its name, type, parent or child, is left out of the result and logged via
//! `tracing` at warn level.
//!
//! # Limitations
//!
//! - Inline `<material>` references inside a `<visual>` are not merged with
//!   root-level definitions; use [`Robot::resolve_material`]
//! - `package://` and relative mesh paths are left unresolved; see
//!   [`ParserOptions::resolve_path`]
//! - `<gazebo>` extensions and XML namespaces are ignored
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the model and options, with a JSON
//!   layout that mirrors the URDF element names
//! - `cli`: the `urdf2json` binary

#![doc(html_root_url = "https://docs.rs/cf-urdf/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::should_implement_trait,
    clippy::unused_self
)]

pub mod coerce;
mod error;
mod options;
mod parser;
mod types;
mod validation;
pub mod xml;

pub use error::{Result, UrdfError};
pub use options::ParserOptions;
pub use parser::{UrdfParser, parse_urdf_file, parse_urdf_str};
pub use types::{
    Actuator, Axis, BoxGeometry, Collision, Color, CylinderGeometry, DEFAULT_RGBA, Geometry,
    Inertia, Inertial, Joint, JointCalibration, JointDynamics, JointLimit, JointMimic, JointType,
    Link, LinkRef, Mass, Material, MeshGeometry, Origin, Rgba, Robot, Shape, SphereGeometry,
    Texture, Transmission, TransmissionJoint, Vector3, Visual,
};
pub use validation::{KinematicTree, validate};
pub use xml::XmlOptions;
