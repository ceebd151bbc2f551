//! Tree queries: by id, by type, generic predicate matching.

use super::node::{NodeData, NodeId};
use super::tree::Ast;

impl Ast {
    /// Find the first node, in document order, whose `id` equals `id`.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|&node| self.get(node).is_some_and(|data| data.id == id))
    }

    /// Find all nodes whose `type` attribute is `type_name`.
    pub fn query_by_type(&self, type_name: &str) -> Vec<NodeId> {
        self.query_all(|data| data.type_name() == type_name)
    }

    /// Find all nodes matching a predicate, in document order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|&node| self.get(node).is_some_and(&predicate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::args::Attributes;
    use crate::ast::node::WidgetKind;
    use crate::ast::tree::Ast;

    /// ```text
    /// screen "Login"
    ///   label #lblUser
    ///   textbox #txtUser
    ///   button #btnLogin
    /// screen "Menu"
    ///   table #tblMain
    ///     row "Help"
    ///     row "Quit"
    /// ```
    fn build_query_tree() -> Ast {
        let mut ast = Ast::new();
        let login = ast.add_screen("Login").unwrap();
        ast.add_widget(login, Attributes::new().with_id("lblUser"), WidgetKind::Label)
            .unwrap();
        ast.add_widget(login, Attributes::new().with_id("txtUser"), WidgetKind::Textbox)
            .unwrap();
        ast.add_widget(login, Attributes::new().with_id("btnLogin"), WidgetKind::Button)
            .unwrap();
        let menu = ast.add_screen("Menu").unwrap();
        let table = ast
            .add_widget(menu, Attributes::new().with_id("tblMain"), WidgetKind::Table)
            .unwrap();
        ast.add_widget(table, "Help", WidgetKind::Row).unwrap();
        ast.add_widget(table, "Quit", WidgetKind::Row).unwrap();
        ast
    }

    #[test]
    fn query_by_id_found() {
        let ast = build_query_tree();
        let node = ast.query_by_id("btnLogin").unwrap();
        assert_eq!(ast.get(node).unwrap().type_name(), "button");
    }

    #[test]
    fn query_by_id_not_found() {
        let ast = build_query_tree();
        assert!(ast.query_by_id("nonexistent").is_none());
    }

    #[test]
    fn query_by_id_reaches_nested_rows() {
        let ast = build_query_tree();
        let node = ast.query_by_id("rowQuit").unwrap();
        assert_eq!(ast.get(node).unwrap().text, "Quit");
    }

    #[test]
    fn query_by_type_in_document_order() {
        let ast = build_query_tree();
        let rows = ast.query_by_type("row");
        let texts: Vec<&str> = rows
            .iter()
            .map(|&id| ast.get(id).unwrap().text.as_str())
            .collect();
        assert_eq!(texts, vec!["Help", "Quit"]);
        assert_eq!(ast.query_by_type("screen").len(), 2);
    }

    #[test]
    fn query_all_with_predicate() {
        let ast = build_query_tree();
        let with_ids = ast.query_all(|data| !data.id.is_empty());
        // Three login widgets, the table and both rows.
        assert_eq!(with_ids.len(), 6);
    }

    #[test]
    fn query_on_empty_tree() {
        let ast = Ast::new();
        assert!(ast.query_by_id("x").is_none());
        assert!(ast.query_by_type("label").is_empty());
    }
}
