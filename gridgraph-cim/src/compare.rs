//! Comparison functions of the catalogue.
//!
//! Layer functions compare the fields a capability adds and project into the
//! layer below; concrete functions start from their top layer.

use crate::entities::*;
use crate::facets::*;
use gridgraph_diff::{FieldValue, ObjectDiff};

impl From<PositionPoint> for FieldValue {
    fn from(point: PositionPoint) -> Self {
        (point.x, point.y).into()
    }
}

// ── Capability layers ───────────────────────────────────────────

pub fn compare_identified_object(diff: &mut ObjectDiff<'_, IdentifiedObjectData>) {
    diff.value("name", |io| io.name.clone())
        .value("description", |io| io.description.clone());
}

pub fn compare_power_system_resource(diff: &mut ObjectDiff<'_, PowerSystemResourceData>) {
    diff.facet(|psr| &psr.io, compare_identified_object)
        .reference("location", |psr| psr.location.as_deref());
}

pub fn compare_equipment(diff: &mut ObjectDiff<'_, EquipmentData>) {
    diff.facet(|e| &e.psr, compare_power_system_resource)
        .value("in_service", |e| e.in_service)
        .value("normally_in_service", |e| e.normally_in_service);
    if diff.options().compare_container_membership {
        diff.unordered("containers", |e| &e.containers);
    }
}

pub fn compare_conducting_equipment(diff: &mut ObjectDiff<'_, ConductingEquipmentData>) {
    diff.facet(|ce| &ce.equipment, compare_equipment);
    if diff.options().compare_terminals {
        diff.ordered("terminals", |ce| ce.terminals.as_slice());
    }
}

pub fn compare_equipment_container(diff: &mut ObjectDiff<'_, EquipmentContainerData>) {
    diff.facet(|c| &c.psr, compare_power_system_resource);
    if diff.options().compare_container_membership {
        diff.unordered("equipment", |c| &c.equipment);
    }
}

pub fn compare_measurement(diff: &mut ObjectDiff<'_, MeasurementData>) {
    diff.facet(|m| &m.io, compare_identified_object)
        .reference("power_system_resource", |m| m.power_system_resource.as_deref())
        .reference("remote_source", |m| m.remote_source.as_deref())
        .value("unit", |m| m.unit.clone());
}

// ── Concrete types ──────────────────────────────────────────────

pub fn compare_location(diff: &mut ObjectDiff<'_, Location>) {
    diff.facet(|l| &l.io, compare_identified_object)
        .ordered("points", |l| l.points.as_slice());
}

pub fn compare_terminal(diff: &mut ObjectDiff<'_, Terminal>) {
    diff.facet(|t| &t.io, compare_identified_object)
        .reference("conducting_equipment", |t| t.conducting_equipment.as_deref())
        .value("sequence_number", |t| t.sequence_number);
}

pub fn compare_remote_source(diff: &mut ObjectDiff<'_, RemoteSource>) {
    diff.facet(|r| &r.io, compare_identified_object)
        .reference("measurement", |r| r.measurement.as_deref());
}

pub fn compare_analog(diff: &mut ObjectDiff<'_, Analog>) {
    diff.facet(|a| &a.measurement, compare_measurement)
        .value("positive_flow_in", |a| a.positive_flow_in);
}

pub fn compare_substation(diff: &mut ObjectDiff<'_, Substation>) {
    diff.facet(|s| &s.container, compare_equipment_container)
        .unordered("normal_energized_feeders", |s| &s.normal_energized_feeders);
}

pub fn compare_feeder(diff: &mut ObjectDiff<'_, Feeder>) {
    diff.facet(|f| &f.container, compare_equipment_container)
        .reference("normal_energizing_substation", |f| {
            f.normal_energizing_substation.as_deref()
        });
}

pub fn compare_breaker(diff: &mut ObjectDiff<'_, Breaker>) {
    diff.facet(|b| &b.ce, compare_conducting_equipment)
        .value("open", |b| b.open)
        .value("normal_open", |b| b.normal_open)
        .float("in_transit_time", |b| b.in_transit_time);
}

pub fn compare_ac_line_segment(diff: &mut ObjectDiff<'_, AcLineSegment>) {
    diff.facet(|s| &s.ce, compare_conducting_equipment)
        .float("length", |s| s.length)
        .unordered("clamps", |s| &s.clamps);
}

pub fn compare_clamp(diff: &mut ObjectDiff<'_, Clamp>) {
    diff.facet(|c| &c.ce, compare_conducting_equipment)
        .reference("ac_line_segment", |c| c.ac_line_segment.as_deref())
        .float("length_from_terminal1", |c| c.length_from_terminal1);
}
