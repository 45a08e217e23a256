use std::fmt;

/// Closed set of completion situations the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionContextKind {
    Unknown,

    // type fields
    ResourceType,
    DataSourceType,
    VariableType,
    ValueType,
    ExportType,
    DataSourceExportType,

    // data source filters
    DataSourceFilterField,
    DataSourceFilterOperator,

    // data source exports
    DataSourceExportAliasForValue,
    DataSourceExportName,

    // export `field` references
    ExportField,
    ExportFieldResourceRef,
    ExportFieldResourceProperty,
    ExportFieldDataSourceRef,
    ExportFieldDataSourceProperty,
    ExportFieldVariableRef,
    ExportFieldValueRef,
    ExportFieldValueProperty,
    ExportFieldChildRef,
    ExportFieldChildProperty,

    // `${..}` substitutions
    StringSubOpen,
    StringSub,
    StringSubVariableRef,
    StringSubVariableProperty,
    StringSubResourceRef,
    StringSubResourceProperty,
    StringSubDataSourceRef,
    StringSubDataSourceProperty,
    StringSubValueRef,
    StringSubValueProperty,
    StringSubChildRef,
    StringSubChildProperty,
    StringSubElemRef,
    StringSubElemProperty,
    StringSubPotentialResourceProperty,

    // values
    ResourceAnnotationValue,
    ResourceSpecFieldValue,
    VersionValue,
    TransformValue,
    VariableDefaultValue,
    LinkSelectorExcludeValue,
    ResourceDependsOnValue,

    // keys
    ResourceSpecField,
    ResourceAnnotationKey,
    ResourceLabelKey,
    ResourceMetadataField,
    ResourceDefinitionField,
    LinkSelectorField,
    VariableDefinitionField,
    ValueDefinitionField,
    DataSourceDefinitionField,
    IncludeDefinitionField,
    ExportDefinitionField,
    DataSourceExportDefinitionField,
    DataSourceMetadataField,
    DataSourceFilterDefinitionField,
    BlueprintTopLevelField,
}

impl CompletionContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionContextKind::Unknown => "unknown",
            CompletionContextKind::ResourceType => "resource_type",
            CompletionContextKind::DataSourceType => "datasource_type",
            CompletionContextKind::VariableType => "variable_type",
            CompletionContextKind::ValueType => "value_type",
            CompletionContextKind::ExportType => "export_type",
            CompletionContextKind::DataSourceExportType => "datasource_export_type",
            CompletionContextKind::DataSourceFilterField => "datasource_filter_field",
            CompletionContextKind::DataSourceFilterOperator => "datasource_filter_operator",
            CompletionContextKind::DataSourceExportAliasForValue => "datasource_export_alias_for_value",
            CompletionContextKind::DataSourceExportName => "datasource_export_name",
            CompletionContextKind::ExportField => "export_field",
            CompletionContextKind::ExportFieldResourceRef => "export_field_resource_ref",
            CompletionContextKind::ExportFieldResourceProperty => "export_field_resource_property",
            CompletionContextKind::ExportFieldDataSourceRef => "export_field_datasource_ref",
            CompletionContextKind::ExportFieldDataSourceProperty => "export_field_datasource_property",
            CompletionContextKind::ExportFieldVariableRef => "export_field_variable_ref",
            CompletionContextKind::ExportFieldValueRef => "export_field_value_ref",
            CompletionContextKind::ExportFieldValueProperty => "export_field_value_property",
            CompletionContextKind::ExportFieldChildRef => "export_field_child_ref",
            CompletionContextKind::ExportFieldChildProperty => "export_field_child_property",
            CompletionContextKind::StringSubOpen => "string_sub_open",
            CompletionContextKind::StringSub => "string_sub",
            CompletionContextKind::StringSubVariableRef => "string_sub_variable_ref",
            CompletionContextKind::StringSubVariableProperty => "string_sub_variable_property",
            CompletionContextKind::StringSubResourceRef => "string_sub_resource_ref",
            CompletionContextKind::StringSubResourceProperty => "string_sub_resource_property",
            CompletionContextKind::StringSubDataSourceRef => "string_sub_datasource_ref",
            CompletionContextKind::StringSubDataSourceProperty => "string_sub_datasource_property",
            CompletionContextKind::StringSubValueRef => "string_sub_value_ref",
            CompletionContextKind::StringSubValueProperty => "string_sub_value_property",
            CompletionContextKind::StringSubChildRef => "string_sub_child_ref",
            CompletionContextKind::StringSubChildProperty => "string_sub_child_property",
            CompletionContextKind::StringSubElemRef => "string_sub_elem_ref",
            CompletionContextKind::StringSubElemProperty => "string_sub_elem_property",
            CompletionContextKind::StringSubPotentialResourceProperty => "string_sub_potential_resource_property",
            CompletionContextKind::ResourceAnnotationValue => "resource_annotation_value",
            CompletionContextKind::ResourceSpecFieldValue => "resource_spec_field_value",
            CompletionContextKind::VersionValue => "version_value",
            CompletionContextKind::TransformValue => "transform_value",
            CompletionContextKind::VariableDefaultValue => "variable_default_value",
            CompletionContextKind::LinkSelectorExcludeValue => "link_selector_exclude_value",
            CompletionContextKind::ResourceDependsOnValue => "resource_depends_on_value",
            CompletionContextKind::ResourceSpecField => "resource_spec_field",
            CompletionContextKind::ResourceAnnotationKey => "resource_annotation_key",
            CompletionContextKind::ResourceLabelKey => "resource_label_key",
            CompletionContextKind::ResourceMetadataField => "resource_metadata_field",
            CompletionContextKind::ResourceDefinitionField => "resource_definition_field",
            CompletionContextKind::LinkSelectorField => "link_selector_field",
            CompletionContextKind::VariableDefinitionField => "variable_definition_field",
            CompletionContextKind::ValueDefinitionField => "value_definition_field",
            CompletionContextKind::DataSourceDefinitionField => "datasource_definition_field",
            CompletionContextKind::IncludeDefinitionField => "include_definition_field",
            CompletionContextKind::ExportDefinitionField => "export_definition_field",
            CompletionContextKind::DataSourceExportDefinitionField => "datasource_export_definition_field",
            CompletionContextKind::DataSourceMetadataField => "datasource_metadata_field",
            CompletionContextKind::DataSourceFilterDefinitionField => "datasource_filter_definition_field",
            CompletionContextKind::BlueprintTopLevelField => "blueprint_top_level_field",
        }
    }

    pub fn is_substitution(&self) -> bool {
        self.as_str().starts_with("string_sub")
    }

    pub fn is_export_field(&self) -> bool {
        self.as_str().starts_with("export_field")
    }
}

impl fmt::Display for CompletionContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
