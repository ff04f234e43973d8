//! End-to-end normalization of the `simple_robot` sample.

use approx::assert_relative_eq;
use cf_urdf::{
    JointMimic, JointType, MeshGeometry, ParserOptions, Shape, UrdfError, UrdfParser, Vector3,
    parse_urdf_file, parse_urdf_str, validate,
};

const SIMPLE_ROBOT: &str = include_str!("data/simple_robot.urdf");

fn sample_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/simple_robot.urdf")
}

/// Test: collection sizes match the sample.
#[test]
fn test_collection_counts() {
    let robot = parse_urdf_str(SIMPLE_ROBOT).expect("should parse");
    assert_eq!(robot.name, "simple_robot");
    assert_eq!(robot.links.len(), 7);
    assert_eq!(robot.joints.len(), 6);
    assert_eq!(robot.materials.len(), 5);
    assert_eq!(robot.transmissions.len(), 2);
}

/// Test: wheel joints, including the mimic.
#[test]
fn test_wheel_joints() {
    let robot = parse_urdf_str(SIMPLE_ROBOT).expect("should parse");

    let right = robot.joint("base_to_right_wheel").expect("right wheel joint");
    assert_eq!(right.joint_type, JointType::Continuous);
    assert_eq!(right.parent.link, "base_link");
    assert_eq!(right.child.link, "right_wheel");
    assert_eq!(right.axis.expect("axis").xyz, Vector3::new(0.0, 1.0, 0.0));

    let left = robot.joint("base_to_left_wheel").expect("left wheel joint");
    assert_eq!(
        left.mimic,
        Some(JointMimic {
            joint: "base_to_right_wheel".into(),
            multiplier: 1.0,
            offset: 0.0,
        })
    );
}

/// Test: root materials and the arm mesh.
#[test]
fn test_materials_and_mesh() {
    let robot = parse_urdf_str(SIMPLE_ROBOT).expect("should parse");

    let blue = robot.material("blue").expect("blue material");
    assert_eq!(blue.color.expect("color").rgba, [0.0, 0.0, 1.0, 1.0]);

    let checker = robot.material("checker").expect("checker material");
    assert!(checker.color.is_none());
    assert_eq!(
        checker.texture.as_ref().expect("texture").filename,
        "textures/checker.png"
    );

    let arm = robot.link("arm").expect("arm link");
    let geometry = arm.visuals[0].geometry.as_ref().expect("geometry");
    assert_eq!(
        geometry.mesh,
        Some(MeshGeometry {
            filename: "meshes/arm.stl".into(),
            scale: Some(Vector3::new(0.1, 0.1, 0.1)),
        })
    );
    assert!(matches!(geometry.shape(), Some(Shape::Mesh(_))));

    // Inline materials stay local to the visual.
    let inline = arm.visuals[0].material.as_ref().expect("inline material");
    assert_eq!(inline.name.as_deref(), Some("arm_orange"));
    assert_eq!(inline.color.expect("color").rgba, [1.0, 0.5, 0.0, 1.0]);
    assert!(robot.resolve_material(inline).is_none());

    let base_material = robot.link("base_link").expect("base").visuals[0]
        .material
        .as_ref()
        .expect("material");
    assert!(base_material.color.is_none());
    assert!(robot.resolve_material(base_material).is_some());
}

/// Test: arm joint optional elements.
#[test]
fn test_arm_joint_details() {
    let robot = parse_urdf_str(SIMPLE_ROBOT).expect("should parse");
    let joint = robot.joint("base_to_arm").expect("arm joint");

    let limit = joint.limit.expect("limit");
    assert_relative_eq!(limit.lower, -1.57);
    assert_relative_eq!(limit.upper, 1.57);
    assert_relative_eq!(limit.effort, 50.0);
    assert_relative_eq!(limit.velocity, 1.0);

    assert_relative_eq!(joint.dynamics.expect("dynamics").damping, 0.7);
    assert_relative_eq!(joint.calibration.expect("calibration").falling, 0.1);

    let caster = robot.joint("base_to_caster").expect("caster joint");
    assert!(caster.axis.is_none());
    assert!(caster.limit.is_none());
    assert_relative_eq!(caster.origin.expect("origin").xyz.z, -0.1);
}

/// Test: transmissions read text content.
#[test]
fn test_transmissions() {
    let robot = parse_urdf_str(SIMPLE_ROBOT).expect("should parse");

    let wheel = robot.transmission("right_wheel_trans").expect("wheel transmission");
    assert_eq!(
        wheel.transmission_type,
        "transmission_interface/SimpleTransmission"
    );
    assert_eq!(wheel.joint.as_ref().expect("joint").name, "base_to_right_wheel");
    let actuator = wheel.actuator.as_ref().expect("actuator");
    assert_eq!(actuator.name, "right_wheel_motor");
    assert_relative_eq!(actuator.mechanical_reduction.expect("reduction"), 30.0);
    assert_eq!(
        actuator.hardware_interfaces,
        ["hardware_interface/VelocityJointInterface"]
    );

    let arm = robot.transmission("arm_trans").expect("arm transmission");
    assert_relative_eq!(
        arm.actuator
            .as_ref()
            .and_then(|a| a.mechanical_reduction)
            .expect("reduction"),
        100.0
    );
}

/// Test: inertial data is kept field by field.
#[test]
fn test_inertial() {
    let robot = parse_urdf_str(SIMPLE_ROBOT).expect("should parse");

    let base = robot.link("base_link").expect("base").inertial.expect("inertial");
    assert_eq!(base.origin.expect("origin").xyz, Vector3::new(0.0, 0.0, 0.05));
    assert_relative_eq!(base.mass.expect("mass").value, 10.0);
    assert_relative_eq!(base.inertia.expect("inertia").izz, 0.2);

    let arm = robot.link("arm").expect("arm").inertial.expect("inertial");
    assert!(arm.origin.is_none());
    assert!(robot.link("gripper").expect("gripper").inertial.is_none());
}

/// Test: the sample is a single kinematic tree.
#[test]
fn test_sample_validates() {
    let robot = parse_urdf_str(SIMPLE_ROBOT).expect("should parse");
    let tree = validate(&robot).expect("should validate");
    assert_eq!(tree.root_link, "base_link");
    assert_eq!(tree.sorted_links.len(), 7);
    assert_eq!(tree.sorted_links[0], "base_link");
    assert_eq!(tree.parent_joint["gripper"], "arm_to_gripper");
}

/// Test: an unnamed link next to a valid one.
#[test]
fn test_unnamed_link_dropped() {
    let robot = parse_urdf_str(
        r#"
        <robot name="partial">
            <link name="kept"/>
            <link>
                <visual><geometry><box size="1 1 1"/></geometry></visual>
            </link>
        </robot>
    "#,
    )
    .expect("should parse");
    assert_eq!(robot.links.len(), 1);
    assert_eq!(robot.links[0].name, "kept");
}

/// Test: fatal document errors.
#[test]
fn test_fatal_errors() {
    let err = parse_urdf_str("<not_a_robot/>").unwrap_err();
    assert!(matches!(err, UrdfError::MissingElement { element: "robot", .. }));
    assert!(err.to_string().contains("robot"));

    let err = parse_urdf_str("<robot><link></robot>").unwrap_err();
    assert!(matches!(err, UrdfError::XmlParse(_)));
}

/// Test: loading from disk and resolving asset paths.
#[test]
fn test_parse_file_and_resolve_paths() {
    let path = sample_path();
    let robot = parse_urdf_file(&path).expect("should load");
    assert_eq!(robot.links.len(), 7);

    let dir = path.parent().expect("parent dir");
    let parser = UrdfParser::new(ParserOptions::new().with_base_path(dir));
    let robot = parser.parse_file(&path).expect("should load");
    let mesh = robot.link("arm").expect("arm").visuals[0]
        .geometry
        .as_ref()
        .and_then(|g| g.mesh.as_ref())
        .expect("mesh");
    assert_eq!(
        parser.options().resolve_path(&mesh.filename),
        dir.join("meshes/arm.stl")
    );

    let gripper = robot.link("gripper").expect("gripper").visuals[0]
        .geometry
        .as_ref()
        .and_then(|g| g.mesh.as_ref())
        .expect("mesh");
    assert_eq!(
        parser.options().resolve_path(&gripper.filename),
        std::path::PathBuf::from("package://simple_robot/meshes/gripper.dae")
    );
}
