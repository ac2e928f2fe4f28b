//! Mobile menu and active-link highlighting

use crate::page::{ElementId, PageSnapshot};

pub trait NavigationView {
    /// Open or close the menu (toggle button and menu share the state)
    fn set_menu_open(&mut self, open: bool);
    fn set_link_active(&mut self, link: usize, active: bool);
}

/// Last path segment, `index.html` for the site root
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(page) if !page.is_empty() => page,
        _ => "index.html",
    }
}

pub fn is_active_link(href: &str, current_page: &str) -> bool {
    href == current_page
}

/// Mark each link active exactly when it targets the current page
pub fn highlight_active_links<V: NavigationView>(path: &str, links: &[String], view: &mut V) {
    let page = current_page(path);
    for (index, href) in links.iter().enumerate() {
        view.set_link_active(index, is_active_link(href, page));
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    menu_open: bool,
}

impl NavigationController {
    /// Needs both the toggle button and the menu
    pub fn attach(page: &PageSnapshot) -> Option<Self> {
        page.has_all(&[ElementId::NavToggle, ElementId::NavMenu])
            .then(Self::default)
    }

    pub fn is_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle<V: NavigationView>(&mut self, view: &mut V) {
        self.menu_open = !self.menu_open;
        view.set_menu_open(self.menu_open);
    }

    pub fn close<V: NavigationView>(&mut self, view: &mut V) {
        self.menu_open = false;
        view.set_menu_open(false);
    }

    /// Clicks outside the toggle and menu close it
    pub fn on_document_click<V: NavigationView>(&mut self, inside_nav: bool, view: &mut V) {
        if !inside_nav {
            self.close(view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct View {
        open: Option<bool>,
        active: BTreeMap<usize, bool>,
    }

    impl NavigationView for View {
        fn set_menu_open(&mut self, open: bool) {
            self.open = Some(open);
        }

        fn set_link_active(&mut self, link: usize, active: bool) {
            self.active.insert(link, active);
        }
    }

    #[rstest]
    #[case("/", "index.html")]
    #[case("", "index.html")]
    #[case("/gallery.html", "gallery.html")]
    #[case("/site/publications.html", "publications.html")]
    fn test_current_page(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(current_page(path), expected);
    }

    #[test]
    fn test_highlight_active_links() {
        let links: Vec<String> = ["index.html", "gallery.html", "cv.html"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut view = View::default();

        highlight_active_links("/gallery.html", &links, &mut view);
        assert_eq!(view.active.get(&0), Some(&false));
        assert_eq!(view.active.get(&1), Some(&true));
        assert_eq!(view.active.get(&2), Some(&false));

        highlight_active_links("/", &links, &mut view);
        assert_eq!(view.active.get(&0), Some(&true));
    }

    #[test]
    fn test_menu_toggle_and_outside_click() {
        let page = PageSnapshot::new("/").with_elements(&[ElementId::NavToggle, ElementId::NavMenu]);
        let mut nav = NavigationController::attach(&page).unwrap();
        let mut view = View::default();

        nav.toggle(&mut view);
        assert!(nav.is_open());
        assert_eq!(view.open, Some(true));

        nav.on_document_click(true, &mut view);
        assert!(nav.is_open());

        nav.on_document_click(false, &mut view);
        assert!(!nav.is_open());
        assert_eq!(view.open, Some(false));
    }

    #[test]
    fn test_requires_toggle_and_menu() {
        let page = PageSnapshot::new("/").with_element(ElementId::NavMenu);
        assert!(NavigationController::attach(&page).is_none());
    }
}
