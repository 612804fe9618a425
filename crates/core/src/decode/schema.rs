//! `API_GetSchema` decoder
//!
//! The response nests everything under `<table>`: fixed metadata under
//! `<original>`, then optional collections for variables, child tables,
//! saved queries and fields. Application schemas and table schemas carry
//! different collections; whatever is absent decodes as empty.

use std::collections::BTreeMap;

use qbase_domain::types::{FieldInfo, QueryInfo, TableSchema, VariableValue};
use roxmltree::Node;

use crate::xml::{self, Envelope};

pub fn table_schema(envelope: &Envelope<'_>) -> TableSchema {
    let Some(table) = envelope.find("table") else {
        return TableSchema::default();
    };
    let original = xml::child(table, "original");
    let meta = |tag: &str| original.map(|node| xml::child_text(node, tag)).unwrap_or_default();
    let meta_int = |tag: &str| xml::parse_int(&meta(tag));
    let meta_date = |tag: &str| xml::parse_millis(&meta(tag));

    TableSchema {
        name: xml::child_text(table, "name"),
        desc: xml::child_text(table, "desc"),
        id: meta("table_id"),
        app_id: meta("app_id"),
        created: meta_date("cre_date"),
        modified: meta_date("mod_date"),
        next_record: meta_int("next_record_id"),
        next_field: meta_int("next_field_id"),
        next_query: meta_int("next_query_id"),
        default_sort_fid: meta_int("def_sort_fid"),
        default_sort_order: meta_int("def_sort_order"),
        variables: variables(table),
        children: children(table),
        queries: queries(table),
        fields: fields(table),
    }
}

fn collection<'a, 'i>(table: Node<'a, 'i>, group: &str, item: &'static str) -> Vec<Node<'a, 'i>> {
    xml::child(table, group)
        .map(|node| node.children().filter(|n| n.has_tag_name(item)).collect())
        .unwrap_or_default()
}

fn variables(table: Node<'_, '_>) -> BTreeMap<String, VariableValue> {
    collection(table, "variables", "var")
        .into_iter()
        .map(|var| (xml::attr(var, "name"), VariableValue::from_text(&xml::text(var))))
        .collect()
}

fn children(table: Node<'_, '_>) -> BTreeMap<String, String> {
    collection(table, "chdbids", "chdbid")
        .into_iter()
        .map(|chdbid| (xml::attr(chdbid, "name"), xml::text(chdbid)))
        .collect()
}

fn queries(table: Node<'_, '_>) -> BTreeMap<String, QueryInfo> {
    collection(table, "queries", "query")
        .into_iter()
        .map(|query| {
            let info = QueryInfo {
                name: xml::child_text(query, "qyname"),
                query_type: xml::child_text(query, "qytype"),
                desc: xml::child_text(query, "qydesc"),
                criteria: xml::child_text(query, "qycrit"),
                sort_list: xml::child_text(query, "qyslist"),
                options: xml::child_text(query, "qyopts"),
                columns: xml::child_text(query, "qycalst"),
            };
            (xml::attr(query, "id"), info)
        })
        .collect()
}

fn fields(table: Node<'_, '_>) -> BTreeMap<String, FieldInfo> {
    collection(table, "fields", "field")
        .into_iter()
        .map(|field| {
            let info = FieldInfo {
                label: xml::child_text(field, "label"),
                field_type: xml::attr(field, "field_type"),
                base_type: xml::attr(field, "base_type"),
                mode: xml::attr(field, "mode"),
            };
            (xml::attr(field, "id"), info)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_SCHEMA: &str = r#"<?xml version="1.0" ?>
<qdbapi>
   <action>API_GetSchema</action>
   <errcode>0</errcode>
   <errtext>No error</errtext>
   <table>
      <name>Projects</name>
      <desc>Active projects</desc>
      <original>
         <table_id>bddnn3uz9</table_id>
         <app_id>bddnc6pn7</app_id>
         <cre_date>1204586581894</cre_date>
         <mod_date>1206394201119</mod_date>
         <next_record_id>34</next_record_id>
         <next_field_id>24</next_field_id>
         <next_query_id>5</next_query_id>
         <def_sort_fid>6</def_sort_fid>
         <def_sort_order>1</def_sort_order>
      </original>
      <variables>
         <var name="Blue">14</var>
         <var name="Jack">Hello World</var>
      </variables>
      <queries>
         <query id="1">
            <qyname>List All</qyname>
            <qytype>table</qytype>
            <qycrit>{'0'.CT.''}</qycrit>
            <qyopts>so-A.</qyopts>
            <qycalst>0.0</qycalst>
         </query>
         <query id="2">
            <qyname>List Changes</qyname>
            <qytype>table</qytype>
            <qydesc>Sorted by Date Modified</qydesc>
            <qyslist>2</qyslist>
         </query>
      </queries>
      <fields>
         <field id="6" field_type="text" base_type="text">
            <label>Name</label>
         </field>
         <field id="7" field_type="currency" base_type="float" mode="formula">
            <label>Budget</label>
         </field>
      </fields>
   </table>
</qdbapi>"#;

    #[test]
    fn test_table_metadata() {
        let envelope = Envelope::parse(TABLE_SCHEMA).unwrap();
        let schema = table_schema(&envelope);
        assert_eq!(schema.name, "Projects");
        assert_eq!(schema.desc, "Active projects");
        assert_eq!(schema.id, "bddnn3uz9");
        assert_eq!(schema.app_id, "bddnc6pn7");
        assert_eq!(schema.created.unwrap().timestamp_millis(), 1_204_586_581_894);
        assert_eq!(schema.next_record, Some(34));
        assert_eq!(schema.next_field, Some(24));
        assert_eq!(schema.default_sort_fid, Some(6));
        assert_eq!(schema.default_sort_order, Some(1));
    }

    #[test]
    fn test_variables_keep_integers_as_numbers() {
        let schema = table_schema(&Envelope::parse(TABLE_SCHEMA).unwrap());
        assert_eq!(schema.variables["Blue"], VariableValue::Integer(14));
        assert_eq!(schema.variables["Jack"], VariableValue::Text("Hello World".into()));
    }

    #[test]
    fn test_queries_and_fields_are_keyed_by_id() {
        let schema = table_schema(&Envelope::parse(TABLE_SCHEMA).unwrap());
        assert_eq!(schema.queries.len(), 2);
        assert_eq!(schema.queries["1"].name, "List All");
        assert_eq!(schema.queries["1"].criteria, "{'0'.CT.''}");
        assert_eq!(schema.queries["2"].desc, "Sorted by Date Modified");
        assert_eq!(schema.queries["2"].sort_list, "2");
        assert_eq!(schema.queries["2"].options, "");

        assert_eq!(schema.fields["6"].label, "Name");
        assert_eq!(schema.fields["7"].base_type, "float");
        assert_eq!(schema.fields["7"].mode, "formula");
        assert!(schema.children.is_empty());
    }

    #[test]
    fn test_application_schema_lists_child_tables() {
        let envelope = Envelope::parse(
            "<qdbapi><errcode>0</errcode><table><name>Project Tracker</name>\
             <original><app_id>bddnc6pn7</app_id><table_id>bddnc6pn7</table_id></original>\
             <chdbids><chdbid name=\"_dbid_projects\">bddnn3uz9</chdbid>\
             <chdbid name=\"_dbid_tasks\">bddnn3uza</chdbid></chdbids></table></qdbapi>",
        )
        .unwrap();
        let schema = table_schema(&envelope);
        assert_eq!(schema.children["_dbid_tasks"], "bddnn3uza");
        assert_eq!(schema.children.len(), 2);
        assert!(schema.queries.is_empty());
        assert!(schema.fields.is_empty());
        assert_eq!(schema.next_record, None);
    }

    #[test]
    fn test_missing_table_decodes_empty() {
        let schema = table_schema(&Envelope::parse("<qdbapi><errcode>0</errcode></qdbapi>").unwrap());
        assert_eq!(schema, TableSchema::default());
    }
}
