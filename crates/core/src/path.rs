use blueprint_api::{NodeId, PathSegment, UnifiedTree};
use std::fmt;

/// Top-level sections and well-known field names of a blueprint.
pub mod sections {
    pub const VERSION: &str = "version";
    pub const TRANSFORM: &str = "transform";
    pub const VARIABLES: &str = "variables";
    pub const VALUES: &str = "values";
    pub const INCLUDE: &str = "include";
    pub const RESOURCES: &str = "resources";
    pub const DATASOURCES: &str = "datasources";
    pub const EXPORTS: &str = "exports";
    pub const METADATA: &str = "metadata";

    pub const TYPE: &str = "type";
    pub const SPEC: &str = "spec";
    pub const ANNOTATIONS: &str = "annotations";
    pub const LABELS: &str = "labels";
    pub const LINK_SELECTOR: &str = "linkSelector";
    pub const EXCLUDE: &str = "exclude";
    pub const DEPENDS_ON: &str = "dependsOn";
    pub const FILTER: &str = "filter";
    pub const FILTERS: &str = "filters";
    pub const FIELD: &str = "field";
    pub const OPERATOR: &str = "operator";
    pub const ALIAS_FOR: &str = "aliasFor";
    pub const DEFAULT: &str = "default";
}

use sections::*;

/// Location of a node as the sequence of keys and indices leading to it.
///
/// Renders as `/resources/orders/spec` and the empty path renders as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StructuredPath(Vec<PathSegment>);

impl StructuredPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn from_node(tree: &UnifiedTree, id: NodeId) -> Self {
        Self(tree.path_of(id))
    }

    /// Parses the rendered form. Purely numeric segments become indices, except
    /// where a blueprint only allows named keys (resource names, annotation keys).
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        for s in raw.split('/').filter(|s| !s.is_empty()) {
            let segment = match s.parse::<usize>() {
                Ok(i) if !Self::keyed_by_name(&segments) => PathSegment::Index(i),
                _ => PathSegment::Field(s.to_string()),
            };
            segments.push(segment);
        }
        Self(segments)
    }

    fn keyed_by_name(parent: &[PathSegment]) -> bool {
        let field = |i: usize| parent.get(i).and_then(PathSegment::as_field);
        match parent.len() {
            1 => matches!(
                field(0),
                Some(VARIABLES | VALUES | INCLUDE | RESOURCES | DATASOURCES | EXPORTS)
            ),
            3 if field(0) == Some(DATASOURCES) && field(2) == Some(EXPORTS) => true,
            _ => matches!(
                parent.last().and_then(PathSegment::as_field),
                Some(ANNOTATIONS | LABELS)
            ),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn parent(&self) -> StructuredPath {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    pub fn field(&self, i: usize) -> Option<&str> {
        self.0.get(i).and_then(|s| s.as_field())
    }

    fn field_is(&self, i: usize, name: &str) -> bool {
        self.field(i) == Some(name)
    }

    fn is_index(&self, i: usize) -> bool {
        self.0.get(i).is_some_and(|s| s.as_index().is_some())
    }

    fn section_is(&self, section: &str) -> bool {
        self.field_is(0, section)
    }

    pub fn section(&self) -> Option<&str> {
        self.field(0)
    }

    // -- top level --

    pub fn is_version(&self) -> bool {
        self.len() == 1 && self.section_is(VERSION)
    }

    pub fn is_transform(&self) -> bool {
        self.section_is(TRANSFORM) && (self.len() == 1 || (self.len() == 2 && self.is_index(1)))
    }

    // -- resources --

    pub fn is_resource_definition(&self) -> bool {
        self.len() == 2 && self.section_is(RESOURCES)
    }

    pub fn is_resource_type(&self) -> bool {
        self.len() == 3 && self.section_is(RESOURCES) && self.field_is(2, TYPE)
    }

    pub fn is_resource_spec(&self) -> bool {
        self.spec_path().is_some()
    }

    /// Segments below `/resources/<name>/spec`, if the path lies inside a resource spec.
    pub fn spec_path(&self) -> Option<&[PathSegment]> {
        if self.len() >= 3 && self.section_is(RESOURCES) && self.field_is(2, SPEC) {
            Some(&self.0[3..])
        } else {
            None
        }
    }

    pub fn is_resource_metadata(&self) -> bool {
        self.len() == 3 && self.section_is(RESOURCES) && self.field_is(2, METADATA)
    }

    pub fn is_resource_annotations(&self) -> bool {
        self.len() == 4
            && self.section_is(RESOURCES)
            && self.field_is(2, METADATA)
            && self.field_is(3, ANNOTATIONS)
    }

    pub fn is_resource_annotation_value(&self) -> bool {
        self.len() == 5
            && self.section_is(RESOURCES)
            && self.field_is(2, METADATA)
            && self.field_is(3, ANNOTATIONS)
    }

    pub fn is_resource_labels(&self) -> bool {
        self.len() == 4
            && self.section_is(RESOURCES)
            && self.field_is(2, METADATA)
            && self.field_is(3, LABELS)
    }

    pub fn is_resource_link_selector(&self) -> bool {
        self.len() == 3 && self.section_is(RESOURCES) && self.field_is(2, LINK_SELECTOR)
    }

    /// The exclude list of a link selector, or one of its items.
    pub fn is_link_selector_exclude(&self) -> bool {
        self.section_is(RESOURCES)
            && self.field_is(2, LINK_SELECTOR)
            && self.field_is(3, EXCLUDE)
            && (self.len() == 4 || (self.len() == 5 && self.is_index(4)))
    }

    pub fn is_resource_depends_on(&self) -> bool {
        self.section_is(RESOURCES)
            && self.field_is(2, DEPENDS_ON)
            && (self.len() == 3 || (self.len() == 4 && self.is_index(3)))
    }

    // -- data sources --

    pub fn is_datasource_definition(&self) -> bool {
        self.len() == 2 && self.section_is(DATASOURCES)
    }

    pub fn is_datasource_type(&self) -> bool {
        self.len() == 3 && self.section_is(DATASOURCES) && self.field_is(2, TYPE)
    }

    pub fn is_datasource_metadata(&self) -> bool {
        self.len() == 3 && self.section_is(DATASOURCES) && self.field_is(2, METADATA)
    }

    fn filter_prefix_len(&self) -> Option<usize> {
        if !self.section_is(DATASOURCES) || !(self.field_is(2, FILTER) || self.field_is(2, FILTERS))
        {
            return None;
        }
        if self.is_index(3) { Some(4) } else { Some(3) }
    }

    /// `/datasources/<name>/filter`, or an item of a `filters` list.
    pub fn is_datasource_filter_definition(&self) -> bool {
        self.filter_prefix_len().is_some_and(|n| self.len() == n)
    }

    pub fn is_datasource_filter_field(&self) -> bool {
        self.filter_prefix_len()
            .is_some_and(|n| self.len() == n + 1 && self.field_is(n, FIELD))
    }

    pub fn is_datasource_filter_operator(&self) -> bool {
        self.filter_prefix_len()
            .is_some_and(|n| self.len() == n + 1 && self.field_is(n, OPERATOR))
    }

    pub fn is_datasource_exports(&self) -> bool {
        self.len() == 3 && self.section_is(DATASOURCES) && self.field_is(2, EXPORTS)
    }

    pub fn is_datasource_export_definition(&self) -> bool {
        self.len() == 4 && self.section_is(DATASOURCES) && self.field_is(2, EXPORTS)
    }

    pub fn is_datasource_export_type(&self) -> bool {
        self.len() == 5
            && self.section_is(DATASOURCES)
            && self.field_is(2, EXPORTS)
            && self.field_is(4, TYPE)
    }

    pub fn is_datasource_export_alias_for(&self) -> bool {
        self.len() == 5
            && self.section_is(DATASOURCES)
            && self.field_is(2, EXPORTS)
            && self.field_is(4, ALIAS_FOR)
    }

    // -- variables, values, includes, exports --

    pub fn is_variable_definition(&self) -> bool {
        self.len() == 2 && self.section_is(VARIABLES)
    }

    pub fn is_variable_type(&self) -> bool {
        self.len() == 3 && self.section_is(VARIABLES) && self.field_is(2, TYPE)
    }

    pub fn is_variable_default(&self) -> bool {
        self.len() == 3 && self.section_is(VARIABLES) && self.field_is(2, DEFAULT)
    }

    pub fn is_value_definition(&self) -> bool {
        self.len() == 2 && self.section_is(VALUES)
    }

    pub fn is_value_type(&self) -> bool {
        self.len() == 3 && self.section_is(VALUES) && self.field_is(2, TYPE)
    }

    pub fn is_include_definition(&self) -> bool {
        self.len() == 2 && self.section_is(INCLUDE)
    }

    pub fn is_export_definition(&self) -> bool {
        self.len() == 2 && self.section_is(EXPORTS)
    }

    pub fn is_export_type(&self) -> bool {
        self.len() == 3 && self.section_is(EXPORTS) && self.field_is(2, TYPE)
    }

    pub fn is_export_field(&self) -> bool {
        self.len() == 3 && self.section_is(EXPORTS) && self.field_is(2, FIELD)
    }

    // -- names --

    fn name_in(&self, section: &str) -> Option<&str> {
        if self.section_is(section) { self.field(1) } else { None }
    }

    pub fn resource_name(&self) -> Option<&str> {
        self.name_in(RESOURCES)
    }

    pub fn data_source_name(&self) -> Option<&str> {
        self.name_in(DATASOURCES)
    }

    pub fn variable_name(&self) -> Option<&str> {
        self.name_in(VARIABLES)
    }

    pub fn value_name(&self) -> Option<&str> {
        self.name_in(VALUES)
    }

    pub fn include_name(&self) -> Option<&str> {
        self.name_in(INCLUDE)
    }

    pub fn export_name(&self) -> Option<&str> {
        self.name_in(EXPORTS)
    }

    pub fn data_source_export_name(&self) -> Option<&str> {
        if self.section_is(DATASOURCES) && self.field_is(2, EXPORTS) {
            self.field(3)
        } else {
            None
        }
    }
}

impl From<Vec<PathSegment>> for StructuredPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for StructuredPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(raw: &str) -> StructuredPath {
        StructuredPath::parse(raw)
    }

    #[test]
    fn test_render_and_parse() {
        let path = p("/resources/orders/linkSelector/exclude/0");
        assert_eq!(path.to_string(), "/resources/orders/linkSelector/exclude/0");
        assert_eq!(path.segments()[4], PathSegment::Index(0));
        assert_eq!(StructuredPath::default().to_string(), "");
        assert!(p("").is_empty());
    }

    #[test]
    fn test_numeric_names_stay_fields_where_keys_are_names() {
        let path = p("/resources/1/spec");
        assert_eq!(path.resource_name(), Some("1"));
        assert_eq!(path.segments()[1], PathSegment::Field("1".into()));

        let path = p("/resources/fn/metadata/annotations/7");
        assert_eq!(path.segments()[4], PathSegment::Field("7".into()));
        assert_eq!(p("/datasources/net/exports/2").data_source_export_name(), Some("2"));
        assert_eq!(p("/resources/fn/dependsOn/2").segments()[3], PathSegment::Index(2));
    }

    #[test]
    fn test_type_predicates_check_length() {
        assert!(p("/resources/orders/type").is_resource_type());
        assert!(!p("/resources/orders/spec/type").is_resource_type());
        assert!(p("/datasources/net/type").is_datasource_type());
        assert!(p("/variables/env/type").is_variable_type());
        assert!(p("/values/limit/type").is_value_type());
        assert!(p("/exports/id/type").is_export_type());
        assert!(p("/datasources/net/exports/vpcId/type").is_datasource_export_type());
    }

    #[test]
    fn test_spec_path() {
        let path = p("/resources/fn/spec/environment/vars");
        assert_eq!(path.spec_path().map(|s| s.len()), Some(2));
        assert_eq!(p("/resources/fn/spec").spec_path().map(|s| s.len()), Some(0));
        assert!(p("/resources/fn/metadata").spec_path().is_none());
        assert!(p("/datasources/fn/spec").spec_path().is_none());
    }

    #[test]
    fn test_filter_paths_with_and_without_index() {
        assert!(p("/datasources/net/filter").is_datasource_filter_definition());
        assert!(p("/datasources/net/filters/1").is_datasource_filter_definition());
        assert!(!p("/datasources/net/filters").is_datasource_filter_definition());
        assert!(p("/datasources/net/filter/field").is_datasource_filter_field());
        assert!(p("/datasources/net/filters/0/operator").is_datasource_filter_operator());
        assert!(!p("/datasources/net/filters/0/search").is_datasource_filter_operator());
    }

    #[test]
    fn test_metadata_and_selector_paths() {
        assert!(p("/resources/r/metadata/annotations").is_resource_annotations());
        assert!(p("/resources/r/metadata/annotations/a.b").is_resource_annotation_value());
        assert!(p("/resources/r/metadata/labels").is_resource_labels());
        assert!(p("/resources/r/linkSelector/exclude").is_link_selector_exclude());
        assert!(p("/resources/r/linkSelector/exclude/2").is_link_selector_exclude());
        assert!(!p("/resources/r/linkSelector/byLabel").is_link_selector_exclude());
        assert!(p("/resources/r/dependsOn/0").is_resource_depends_on());
    }

    #[test]
    fn test_name_extraction() {
        let path = p("/datasources/net/exports/vpcId/aliasFor");
        assert_eq!(path.data_source_name(), Some("net"));
        assert_eq!(path.data_source_export_name(), Some("vpcId"));
        assert!(path.is_datasource_export_alias_for());
        assert_eq!(path.resource_name(), None);
        assert_eq!(p("/resources/orders").resource_name(), Some("orders"));
        assert_eq!(p("/exports/tableId/field").export_name(), Some("tableId"));
        assert!(p("/exports/tableId/field").is_export_field());
    }
}
