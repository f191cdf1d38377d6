//! Go source templates
//!
//! Custom object types, their values and the external type adapters are
//! rendered with minijinja. Schema fragments are small enough to build with
//! `format!` and do not go through here.

use crate::{Error, Result};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

/// A Go source template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// `<Name>Type` embedding `basetypes.ObjectType`
    ObjectType,
    /// `<Name>Value` and its null/unknown constructors
    ObjectValue,
    /// `To<Ext>`/`From<Ext>` methods on `<Name>Value`
    ToFrom,
}

impl Template {
    /// Template name, reported in render errors
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ObjectType => "object_type.go",
            Self::ObjectValue => "object_value.go",
            Self::ToFrom => "to_from.go",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::ObjectType => OBJECT_TYPE,
            Self::ObjectValue => OBJECT_VALUE,
            Self::ToFrom => TO_FROM,
        }
    }
}

/// Render `template` with `context` for the attribute or block `name`
///
/// # Errors
///
/// Returns [`Error::Render`] if the template fails to compile or render
pub fn render<S: Serialize>(template: Template, name: &str, context: S) -> Result<String> {
    let to_error = |source: minijinja::Error| Error::Render {
        template: template.name(),
        name: name.to_string(),
        source,
    };

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(template.name(), template.source())
        .map_err(to_error)?;

    let rendered = env
        .get_template(template.name())
        .and_then(|tmpl| tmpl.render(context))
        .map_err(to_error)?;

    tracing::trace!(
        template = template.name(),
        name,
        bytes = rendered.len(),
        "Rendered template"
    );
    Ok(rendered)
}

const OBJECT_TYPE: &str = r##"
var _ basetypes.ObjectTypable = {{ name }}Type{}

type {{ name }}Type struct {
	basetypes.ObjectType
}

func (t {{ name }}Type) Equal(o attr.Type) bool {
	other, ok := o.({{ name }}Type)

	if !ok {
		return false
	}

	return t.ObjectType.Equal(other.ObjectType)
}

func (t {{ name }}Type) String() string {
	return "{{ name }}Type"
}

func (t {{ name }}Type) ValueFromObject(ctx context.Context, in basetypes.ObjectValue) (basetypes.ObjectValuable, diag.Diagnostics) {
	var diags diag.Diagnostics

	attributes := in.Attributes()
{% for field in fields %}

	{{ field.camel }}Attribute, ok := attributes["{{ field.name }}"]

	if !ok {
		diags.AddError(
			"Attribute Missing",
			`{{ field.name }} is missing from object`)

		return nil, diags
	}

	{{ field.camel }}Val, ok := {{ field.camel }}Attribute.({{ field.value_type }})

	if !ok {
		diags.AddError(
			"Attribute Wrong Type",
			fmt.Sprintf(`{{ field.name }} expected to be {{ field.value_type }}, was: %T`, {{ field.camel }}Attribute))
	}
{% endfor %}

	if diags.HasError() {
		return nil, diags
	}

	return {{ name }}Value{
{% for field in fields %}
		{{ field.pascal }}: {{ field.camel }}Val,
{% endfor %}
		state: attr.ValueStateKnown,
	}, diags
}

func (t {{ name }}Type) ValueFromTerraform(ctx context.Context, in tftypes.Value) (attr.Value, error) {
	if in.Type() == nil {
		return New{{ name }}ValueNull(), nil
	}

	if !in.Type().Equal(t.TerraformType(ctx)) {
		return nil, fmt.Errorf("expected %s, got %s", t.TerraformType(ctx), in.Type())
	}

	if !in.IsKnown() {
		return New{{ name }}ValueUnknown(), nil
	}

	if in.IsNull() {
		return New{{ name }}ValueNull(), nil
	}

	attributes := map[string]attr.Value{}

	val := map[string]tftypes.Value{}

	err := in.As(&val)

	if err != nil {
		return nil, err
	}

	for k, v := range val {
		a, err := t.AttrTypes[k].ValueFromTerraform(ctx, v)

		if err != nil {
			return nil, err
		}

		attributes[k] = a
	}

	objectValue, diags := basetypes.NewObjectValue(t.AttrTypes, attributes)

	if diags.HasError() {
		return nil, fmt.Errorf("unexpected error converting {{ name }}Value: %v", diags)
	}

	value, diags := t.ValueFromObject(ctx, objectValue)

	if diags.HasError() {
		return nil, fmt.Errorf("unexpected error converting {{ name }}Value: %v", diags)
	}

	return value, nil
}

func (t {{ name }}Type) ValueType(ctx context.Context) attr.Value {
	return {{ name }}Value{}
}
"##;

const OBJECT_VALUE: &str = r##"
var _ basetypes.ObjectValuable = {{ name }}Value{}

type {{ name }}Value struct {
{% for field in fields %}
	{{ field.pascal }} {{ field.value_type }} `tfsdk:"{{ field.name }}"`
{% endfor %}
	state attr.ValueState
}

func New{{ name }}ValueNull() {{ name }}Value {
	return {{ name }}Value{
		state: attr.ValueStateNull,
	}
}

func New{{ name }}ValueUnknown() {{ name }}Value {
	return {{ name }}Value{
		state: attr.ValueStateUnknown,
	}
}

func (v {{ name }}Value) ToTerraformValue(ctx context.Context) (tftypes.Value, error) {
	attrTypes := make(map[string]tftypes.Type, {{ fields|length }})
{% if fields %}

	var val tftypes.Value
	var err error
{% endif %}
{% for field in fields %}

	attrTypes["{{ field.name }}"] = {{ field.attr_type }}.TerraformType(ctx)
{% endfor %}

	objectType := tftypes.Object{AttributeTypes: attrTypes}

	switch v.state {
	case attr.ValueStateKnown:
		vals := make(map[string]tftypes.Value, {{ fields|length }})
{% for field in fields %}

		val, err = v.{{ field.pascal }}.ToTerraformValue(ctx)

		if err != nil {
			return tftypes.NewValue(objectType, tftypes.UnknownValue), err
		}

		vals["{{ field.name }}"] = val
{% endfor %}

		if err := tftypes.ValidateValue(objectType, vals); err != nil {
			return tftypes.NewValue(objectType, tftypes.UnknownValue), err
		}

		return tftypes.NewValue(objectType, vals), nil
	case attr.ValueStateNull:
		return tftypes.NewValue(objectType, nil), nil
	case attr.ValueStateUnknown:
		return tftypes.NewValue(objectType, tftypes.UnknownValue), nil
	default:
		panic(fmt.Sprintf("unhandled Object state in ToTerraformValue: %s", v.state))
	}
}

func (v {{ name }}Value) IsNull() bool {
	return v.state == attr.ValueStateNull
}

func (v {{ name }}Value) IsUnknown() bool {
	return v.state == attr.ValueStateUnknown
}

func (v {{ name }}Value) String() string {
	return "{{ name }}Value"
}

func (v {{ name }}Value) ToObjectValue(ctx context.Context) (basetypes.ObjectValue, diag.Diagnostics) {
	var diags diag.Diagnostics

	attributeTypes := v.AttributeTypes(ctx)
{% for field in fields %}
{% if field.collection %}

	var {{ field.camel }}Val basetypes.{{ field.collection.kind }}Value
	switch {
	case v.{{ field.pascal }}.IsUnknown():
		{{ field.camel }}Val = types.{{ field.collection.kind }}Unknown({{ field.collection.element_type }})
	case v.{{ field.pascal }}.IsNull():
		{{ field.camel }}Val = types.{{ field.collection.kind }}Null({{ field.collection.element_type }})
	default:
		var d diag.Diagnostics
		{{ field.camel }}Val, d = types.{{ field.collection.kind }}Value({{ field.collection.element_type }}, v.{{ field.pascal }}.Elements())
		diags.Append(d...)
	}

	if diags.HasError() {
		return types.ObjectUnknown(attributeTypes), diags
	}
{% endif %}
{% endfor %}

	if v.IsNull() {
		return types.ObjectNull(attributeTypes), diags
	}

	if v.IsUnknown() {
		return types.ObjectUnknown(attributeTypes), diags
	}

	objVal, d := types.ObjectValue(
		attributeTypes,
		map[string]attr.Value{
{% for field in fields %}
{% if field.collection %}
			"{{ field.name }}": {{ field.camel }}Val,
{% else %}
			"{{ field.name }}": v.{{ field.pascal }},
{% endif %}
{% endfor %}
		})
	diags.Append(d...)

	return objVal, diags
}

func (v {{ name }}Value) Equal(o attr.Value) bool {
	other, ok := o.({{ name }}Value)

	if !ok {
		return false
	}

	if v.state != other.state {
		return false
	}

	if v.state != attr.ValueStateKnown {
		return true
	}
{% for field in fields %}

	if !v.{{ field.pascal }}.Equal(other.{{ field.pascal }}) {
		return false
	}
{% endfor %}

	return true
}

func (v {{ name }}Value) Type(ctx context.Context) attr.Type {
	return {{ name }}Type{
		basetypes.ObjectType{
			AttrTypes: v.AttributeTypes(ctx),
		},
	}
}

func (v {{ name }}Value) AttributeTypes(ctx context.Context) map[string]attr.Type {
	return map[string]attr.Type{
{% for field in fields %}
		"{{ field.name }}": {{ field.attr_type }},
{% endfor %}
	}
}
"##;

const TO_FROM: &str = r##"
func (v {{ name }}Value) To{{ suffix }}(ctx context.Context) ({{ external_type }}, diag.Diagnostics) {
	var diags diag.Diagnostics

	if v.IsNull() {
		return {{ zero }}, diags
	}

	if v.IsUnknown() {
		diags.Append(diag.NewErrorDiagnostic(
			"{{ name }}Value Value Is Unknown",
			`"{{ name }}Value" is unknown.`,
		))

		return {{ zero }}, diags
	}
{% for field in fields %}
{% if field.object %}

	{{ field.camel }}Object, d := {{ field.type_name }}Type{}.ValueFromObject(ctx, v.{{ field.pascal }})
	diags.Append(d...)

	if diags.HasError() {
		return {{ zero }}, diags
	}

	{{ field.camel }}Field, d := {{ field.camel }}Object.({{ field.type_name }}Value).To{{ field.suffix }}(ctx)
	diags.Append(d...)

	if diags.HasError() {
		return {{ zero }}, diags
	}
{% endif %}
{% endfor %}

	return {% if pointer %}&{% endif %}{{ type_reference }}{
{% for field in fields %}
{% if field.object %}
		{{ field.pascal }}: {{ field.camel }}Field,
{% else %}
		{{ field.pascal }}: v.{{ field.pascal }}.{{ field.to }}(),
{% endif %}
{% endfor %}
	}, diags
}

func (v {{ name }}Value) From{{ suffix }}(ctx context.Context, apiObject {{ external_type }}) ({{ name }}Value, diag.Diagnostics) {
	var diags diag.Diagnostics
{% if pointer %}

	if apiObject == nil {
		return New{{ name }}ValueNull(), diags
	}
{% endif %}
{% for field in fields %}
{% if field.object %}

	{{ field.camel }}Value, d := {{ field.type_name }}Value{}.From{{ field.suffix }}(ctx, apiObject.{{ field.pascal }})
	diags.Append(d...)

	if diags.HasError() {
		return New{{ name }}ValueUnknown(), diags
	}

	{{ field.camel }}Field, d := {{ field.camel }}Value.ToObjectValue(ctx)
	diags.Append(d...)

	if diags.HasError() {
		return New{{ name }}ValueUnknown(), diags
	}
{% endif %}
{% endfor %}

	return {{ name }}Value{
{% for field in fields %}
{% if field.object %}
		{{ field.pascal }}: {{ field.camel }}Field,
{% elif field.custom_value_type %}
		{{ field.pascal }}: {{ field.custom_value_type }}{
			{{ field.base }}Value: types.{{ field.from }}(apiObject.{{ field.pascal }}),
		},
{% else %}
		{{ field.pascal }}: types.{{ field.from }}(apiObject.{{ field.pascal }}),
{% endif %}
{% endfor %}
		state: attr.ValueStateKnown,
	}, diags
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_object_type_lists_fields() {
        let out = render(
            Template::ObjectType,
            "config",
            json!({
                "name": "Config",
                "fields": [{
                    "name": "id",
                    "pascal": "Id",
                    "camel": "id",
                    "value_type": "basetypes.StringValue",
                    "attr_type": "basetypes.StringType{}",
                }],
            }),
        )
        .unwrap();
        assert!(out.contains("type ConfigType struct {\n\tbasetypes.ObjectType\n}"));
        assert!(out.contains("idAttribute, ok := attributes[\"id\"]"));
        assert!(out.contains("\t\tId: idVal,\n"));
    }

    #[test]
    fn test_render_does_not_escape() {
        let out = render(
            Template::ObjectValue,
            "config",
            json!({
                "name": "Config",
                "fields": [{
                    "name": "tags",
                    "pascal": "Tags",
                    "camel": "tags",
                    "value_type": "basetypes.SetValue",
                    "attr_type": "basetypes.SetType{\nElemType: types.StringType,\n}",
                    "collection": {"kind": "Set", "element_type": "types.StringType"},
                }],
            }),
        )
        .unwrap();
        assert!(out.contains("Tags basetypes.SetValue `tfsdk:\"tags\"`"));
        assert!(out.contains("types.SetValue(types.StringType, v.Tags.Elements())"));
        assert!(!out.contains("&quot;"));
    }

    #[test]
    fn test_template_names() {
        assert_eq!(Template::ObjectType.name(), "object_type.go");
        assert_eq!(Template::ToFrom.name(), "to_from.go");
    }
}
