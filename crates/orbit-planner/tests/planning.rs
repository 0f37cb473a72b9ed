//! Planning scenarios across selection, assignment and assembly

use orbit_planner::{
    assemble_deployment, assign_components_to_targets, create_deployment,
    create_deployment_from_target, match_targets,
};
use orbit_types::{
    BindingSpec, ComponentSpec, DeviceSpec, DeviceState, InstanceSpec, InstanceState,
    SolutionSpec, SolutionState, TargetSelector, TargetSpec, TargetState, TopologySpec,
};
use std::collections::BTreeMap;

fn os_constraint(os: &str) -> String {
    format!("${{{{$equal($property(OS),{})}}}}", os)
}

fn os_target(id: &str, os: &str) -> TargetState {
    TargetState::new(id, TargetSpec::default().with_property("OS", os))
}

fn instance(id: &str, solution: &str, selector: TargetSelector) -> InstanceState {
    InstanceState::new(id, InstanceSpec::new(solution, selector))
}

fn ids(targets: &[TargetState]) -> Vec<&str> {
    targets.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn selector_by_name() {
    let targets = vec![TargetState::new("t1", TargetSpec::default())];

    let found = match_targets(&instance("i", "s", TargetSelector::by_name("t1")), &targets);
    assert_eq!(ids(&found), vec!["t1"]);

    let found = match_targets(
        &instance("i", "s", TargetSelector::by_name("missing")),
        &targets,
    );
    assert!(found.is_empty());
}

#[test]
fn selector_by_property() {
    let targets = vec![os_target("t1", "windows")];
    let by = |key: &str, value: &str| {
        instance("i", "s", TargetSelector::by_properties([(key, value)]))
    };

    assert_eq!(ids(&match_targets(&by("OS", "windows"), &targets)), vec!["t1"]);
    assert!(match_targets(&by("OS", "linux"), &targets).is_empty());
    assert!(match_targets(&by("GPU", "yes"), &targets).is_empty());
}

#[test]
fn assignment_skips_components_whose_constraint_is_false() {
    let components = vec![
        ComponentSpec::new("c1"),
        ComponentSpec::new("c2").with_constraints(os_constraint("linux")),
    ];
    let mut targets = BTreeMap::new();
    targets.insert(
        "t1".to_string(),
        TargetSpec::default().with_property("OS", "windows"),
    );

    let assignments = assign_components_to_targets(&components, &targets).unwrap();
    assert_eq!(assignments["t1"], "{c1}");
}

#[test]
fn assignment_with_mixed_constraints() {
    let components = vec![
        ComponentSpec::new("c1").with_constraints(os_constraint("windows")),
        ComponentSpec::new("c2").with_constraints(os_constraint("linux")),
        ComponentSpec::new("c3").with_constraints(os_constraint("unix")),
    ];
    let targets: BTreeMap<String, TargetSpec> = [
        ("target1", "windows"),
        ("target2", "linux"),
        ("target3", "unix"),
    ]
    .into_iter()
    .map(|(id, os)| (id.to_string(), TargetSpec::default().with_property("OS", os)))
    .collect();

    let assignments = assign_components_to_targets(&components, &targets).unwrap();

    let expected: BTreeMap<String, String> = [
        ("target1", "{c1}"),
        ("target2", "{c2}"),
        ("target3", "{c3}"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(assignments, expected);
}

#[test]
fn single_target_synthesis() {
    let target = TargetState::new(
        "tgt",
        TargetSpec::default().with_components(vec![
            ComponentSpec::new("c1"),
            ComponentSpec::new("c2"),
        ]),
    );

    let plan = create_deployment_from_target(&target).unwrap();

    assert_eq!(plan.solution_name, "target-runtime-tgt");
    assert_eq!(plan.instance.target.name, "tgt");
    assert_eq!(plan.instance.name, "target-runtime-tgt");
    assert_eq!(plan.assignments.len(), 1);
    assert_eq!(plan.assignments["tgt"], "{c1}{c2}");
    assert!(plan.is_target_runtime());
}

#[test]
fn single_target_respects_component_constraints() {
    let target = TargetState::new(
        "tgt",
        TargetSpec::default()
            .with_property("OS", "linux")
            .with_components(vec![
                ComponentSpec::new("win").with_constraints(os_constraint("windows")),
                ComponentSpec::new("lin").with_constraints(os_constraint("linux")),
            ]),
    );

    let plan = create_deployment_from_target(&target).unwrap();
    assert_eq!(plan.assigned_components("tgt"), vec!["lin"]);
}

#[test]
fn empty_match_set_is_not_an_error() {
    let solution = SolutionState::new(
        "sol",
        SolutionSpec::with_components(vec![ComponentSpec::new("c1")]),
    );
    let plan = create_deployment(
        &instance("i", "sol", TargetSelector::by_properties([("OS", "beos")])),
        &solution,
        &[os_target("t1", "linux")],
        &[],
    )
    .unwrap();

    assert!(plan.targets.is_empty());
    assert!(plan.assignments.is_empty());
    assert_eq!(plan.solution_name, "sol");
}

#[test]
fn plan_covers_every_selected_target() {
    let solution = SolutionState::new(
        "fleet",
        SolutionSpec::with_components(vec![
            ComponentSpec::new("agent"),
            ComponentSpec::new("win-driver").with_constraints(os_constraint("windows")),
        ]),
    );
    let mut targets = vec![
        os_target("b", "windows"),
        os_target("a", "linux"),
        os_target("c", "linux"),
    ];
    for target in &mut targets {
        if let Some(spec) = target.spec.as_mut() {
            spec.properties.insert("site".into(), "plant-7".into());
        }
    }

    let plan = create_deployment(
        &instance("i", "fleet", TargetSelector::by_properties([("site", "plant-7")])),
        &solution,
        &targets,
        &[],
    )
    .unwrap();

    assert_eq!(plan.targets.len(), 3);
    assert_eq!(
        plan.targets.keys().collect::<Vec<_>>(),
        plan.assignments.keys().collect::<Vec<_>>()
    );
    assert_eq!(plan.assignments["a"], "{agent}");
    assert_eq!(plan.assignments["b"], "{agent}{win-driver}");
}

#[test]
fn target_specs_are_copied_verbatim() {
    let spec = TargetSpec {
        display_name: "Edge Gateway".into(),
        topologies: vec![TopologySpec {
            device: "cam-1".into(),
            bindings: vec![BindingSpec {
                role: "instance".into(),
                provider: "providers.target.k8s".into(),
                config: BTreeMap::new(),
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
    .with_property("OS", "linux");
    let target = TargetState::new("gw", spec.clone());

    let solution = SolutionState::new("s", SolutionSpec::default());
    let plan = create_deployment(
        &instance("i", "s", TargetSelector::by_name("gw")),
        &solution,
        &[target],
        &[],
    )
    .unwrap();

    assert_eq!(plan.targets["gw"], spec);
    assert_eq!(
        plan.targets["gw"].binding_for("instance").map(|b| b.provider.as_str()),
        Some("providers.target.k8s")
    );
}

#[test]
fn diagnostics_are_reported_without_failing_the_plan() {
    let solution = SolutionState::new(
        "s",
        SolutionSpec::with_components(vec![
            ComponentSpec::new("good"),
            ComponentSpec::new("bad").with_constraints("${{$nope(OS)}}"),
        ]),
    );
    let planned = assemble_deployment(
        &instance("i", "s", TargetSelector::by_name("t1")),
        &solution,
        &[os_target("t1", "linux")],
        &[],
    )
    .unwrap();

    assert_eq!(planned.plan.assignments["t1"], "{good}");
    assert_eq!(planned.diagnostics.len(), 1);
    assert_eq!(planned.diagnostics[0].component, "bad");
    assert_eq!(planned.diagnostics[0].target, "t1");
}

#[test]
fn duplicate_component_names_are_assigned_per_occurrence() {
    let solution = SolutionState::new(
        "s",
        SolutionSpec::with_components(vec![ComponentSpec::new("x"), ComponentSpec::new("x")]),
    );
    let plan = create_deployment(
        &instance("i", "s", TargetSelector::by_name("t1")),
        &solution,
        &[os_target("t1", "linux")],
        &[],
    )
    .unwrap();
    assert_eq!(plan.assignments["t1"], "{x}{x}");

    let target = TargetState::new(
        "edge",
        TargetSpec::default()
            .with_components(vec![ComponentSpec::new("a"), ComponentSpec::new("a")]),
    );
    let plan = create_deployment_from_target(&target).unwrap();
    assert_eq!(plan.assignments["edge"], "{a}{a}");
}

#[test]
fn devices_are_passed_through() {
    let solution = SolutionState::new("s", SolutionSpec::default());
    let device = DeviceState::new(
        "cam-1",
        DeviceSpec {
            display_name: "Line camera".into(),
            ..Default::default()
        },
    );

    let plan = create_deployment(
        &instance("i", "s", TargetSelector::by_name("t1")),
        &solution,
        &[os_target("t1", "linux")],
        &[device],
    )
    .unwrap();

    assert_eq!(plan.devices.len(), 1);
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["devices"][0]["displayName"], "Line camera");
}

#[test]
fn plan_json_keeps_downstream_field_names() {
    let solution = SolutionState::new(
        "s",
        SolutionSpec::with_components(vec![ComponentSpec::new("c1")]),
    );
    let plan = create_deployment(
        &instance("i", "s", TargetSelector::by_name("t1")),
        &solution,
        &[os_target("t1", "linux")],
        &[],
    )
    .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["solutionName"], "s");
    assert_eq!(json["instance"]["name"], "i");
    assert_eq!(json["targets"]["t1"]["properties"]["OS"], "linux");
    assert_eq!(json["assignments"]["t1"], "{c1}");
    assert!(json["solution"]["components"].is_array());
}
