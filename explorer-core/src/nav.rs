use std::fmt;

use crate::screen::ScreenId;

/// Identifies one mounted screen. Every push gets a fresh id, so visiting the
/// same screen twice yields two distinct instances.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub screen: ScreenId,
    pub instance: InstanceId,
}

/// History of visited screens. The root entry lives outside of the vector,
/// so the stack can never run empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationStack {
    root: Entry,
    above: Vec<Entry>,
}

impl NavigationStack {
    fn new(root: Entry) -> Self {
        Self {
            root,
            above: Vec::new(),
        }
    }

    pub fn top(&self) -> &Entry {
        self.above.last().unwrap_or(&self.root)
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.above.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Entries from the root to the top.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        std::iter::once(&self.root).chain(self.above.iter())
    }

    fn push(&mut self, entry: Entry) {
        self.above.push(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        self.above.pop()
    }
}

/// Navigation request emitted by rendered content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Navigate(ScreenId),
    NavigateUp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: InstanceId,
    pub to: InstanceId,
    pub popped: Option<Entry>,
}

impl Transition {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }

    /// Instance that left the stack and will never be shown again.
    pub fn torn_down(&self) -> Option<InstanceId> {
        self.popped.as_ref().map(|entry| entry.instance)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    stack: NavigationStack,
    next_instance: u64,
}

impl Navigator {
    /// Starts at the welcome screen, which stays at the bottom of the stack.
    pub fn new() -> Self {
        let root = Entry {
            screen: ScreenId::Welcome,
            instance: InstanceId(0),
        };
        Self {
            stack: NavigationStack::new(root),
            next_instance: 1,
        }
    }

    pub fn navigate(&mut self, target: ScreenId) -> InstanceId {
        let instance = InstanceId(self.next_instance);
        self.next_instance += 1;
        log::debug!("navigating to {target:?} as {instance}");
        self.stack.push(Entry {
            screen: target,
            instance,
        });
        instance
    }

    /// Navigates to a route string.
    ///
    /// # Panics
    ///
    /// Unregistered routes are a programming error and panic.
    pub fn navigate_route(&mut self, route: &str) -> InstanceId {
        match ScreenId::from_route(route) {
            Some(target) => self.navigate(target),
            None => panic!("navigation to unregistered route {route:?}"),
        }
    }

    pub fn navigate_up(&mut self) -> bool {
        self.pop().is_some()
    }

    fn pop(&mut self) -> Option<Entry> {
        let popped = self.stack.pop();
        match &popped {
            Some(entry) => log::debug!("leaving {:?} {}", entry.screen, entry.instance),
            None => log::debug!("already at the root screen"),
        }
        popped
    }

    pub fn dispatch(&mut self, intent: Intent) -> Transition {
        let from = self.current_instance();
        let popped = match intent {
            Intent::Navigate(target) => {
                self.navigate(target);
                None
            }
            Intent::NavigateUp => self.pop(),
        };
        Transition {
            from,
            to: self.current_instance(),
            popped,
        }
    }

    pub fn current(&self) -> &ScreenId {
        &self.stack.top().screen
    }

    pub fn current_instance(&self) -> InstanceId {
        self.stack.top().instance
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_navigate_up(&self) -> bool {
        self.depth() > 1
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::catalog::{self, City};

    fn prague() -> ScreenId {
        ScreenId::Detail(City::new("Prague").unwrap())
    }

    #[test]
    fn starts_at_welcome() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), &ScreenId::Welcome);
        assert_eq!(nav.stack().root().screen, ScreenId::Welcome);
        assert_eq!(nav.depth(), 1);
        assert!(!nav.can_navigate_up());
    }

    #[test]
    fn welcome_stays_at_the_bottom() {
        let mut nav = Navigator::default();
        nav.navigate(ScreenId::List);
        nav.navigate(prague());
        while nav.navigate_up() {}
        assert_eq!(nav.stack().root().screen, ScreenId::Welcome);
        assert_eq!(nav.current(), &ScreenId::Welcome);
        assert_eq!(nav.current_instance(), nav.stack().root().instance);
    }

    #[test]
    fn navigate_up_at_root_is_a_noop() {
        let mut nav = Navigator::new();
        let instance = nav.current_instance();
        assert!(!nav.navigate_up());
        assert_eq!(nav.current(), &ScreenId::Welcome);
        assert_eq!(nav.current_instance(), instance);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn list_and_back_returns_to_welcome() {
        let mut nav = Navigator::new();
        nav.navigate(ScreenId::List);
        assert_eq!(nav.current(), &ScreenId::List);
        assert!(nav.navigate_up());
        assert_eq!(nav.current(), &ScreenId::Welcome);
    }

    #[test]
    fn every_push_gets_a_new_instance() {
        let mut nav = Navigator::new();
        nav.navigate(ScreenId::List);
        let first = nav.navigate(prague());
        nav.navigate_up();
        let second = nav.navigate(prague());
        assert_ne!(first, second);
        assert_eq!(nav.current_instance(), second);
    }

    #[test]
    fn stack_lists_entries_from_root() {
        let mut nav = Navigator::new();
        nav.navigate(ScreenId::List);
        nav.navigate(prague());
        let screens: Vec<_> = nav.stack().iter().map(|e| e.screen.clone()).collect();
        assert_eq!(screens, [ScreenId::Welcome, ScreenId::List, prague()]);
        assert_eq!(nav.stack().root().screen, ScreenId::Welcome);
    }

    #[test]
    fn navigate_by_route() {
        let mut nav = Navigator::new();
        nav.navigate_route("list screen");
        nav.navigate_route("city detail screen/Barcelona");
        assert_eq!(
            nav.current(),
            &ScreenId::Detail(City::new("Barcelona").unwrap())
        );
    }

    #[test]
    #[should_panic(expected = "unregistered route")]
    fn unknown_route_panics() {
        let mut nav = Navigator::new();
        nav.navigate_route("settings screen");
    }

    #[test]
    fn dispatch_reports_torn_down_instance() {
        let mut nav = Navigator::new();
        let forward = nav.dispatch(Intent::Navigate(ScreenId::List));
        assert!(forward.is_change());
        assert_eq!(forward.torn_down(), None);

        let detail = nav.dispatch(Intent::Navigate(prague()));
        let back = nav.dispatch(Intent::NavigateUp);
        assert_eq!(back.from, detail.to);
        assert_eq!(back.to, forward.to);
        assert_eq!(back.torn_down(), Some(detail.to));

        nav.dispatch(Intent::NavigateUp);
        let at_root = nav.dispatch(Intent::NavigateUp);
        assert!(!at_root.is_change());
        assert_eq!(at_root.torn_down(), None);
    }

    #[test]
    fn random_walks_never_empty_the_stack() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let cities: Vec<City> = catalog::cities().collect();
        for _ in 0..64 {
            let mut nav = Navigator::new();
            let mut expected_depth = 1;
            for _ in 0..rng.random_range(0..200) {
                if rng.random_bool(0.5) {
                    let target = match rng.random_range(0..3) {
                        0 => ScreenId::Welcome,
                        1 => ScreenId::List,
                        _ => ScreenId::Detail(cities[rng.random_range(0..cities.len())].clone()),
                    };
                    nav.navigate(target.clone());
                    expected_depth += 1;
                    assert_eq!(nav.current(), &target);
                } else {
                    let popped = nav.navigate_up();
                    assert_eq!(popped, expected_depth > 1);
                    if popped {
                        expected_depth -= 1;
                    }
                }
                assert_eq!(nav.depth(), expected_depth);
                assert!(nav.depth() >= 1);
                assert_eq!(nav.stack().root().screen, ScreenId::Welcome);
            }
        }
    }
}
