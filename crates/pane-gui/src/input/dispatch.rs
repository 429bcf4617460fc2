//! Subscriber lists for input delivery

use crate::object::{ObjectId, Subscriptions};
use crate::registry::Registry;

/// Which stream a delivery targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Keys,
    Pointer,
    Updates,
}

impl Channel {
    #[inline]
    fn wants(self, subs: Subscriptions) -> bool {
        match self {
            Channel::Keys => subs.keys,
            Channel::Pointer => subs.pointer,
            Channel::Updates => subs.updates,
        }
    }
}

/// Ordered subscriber lists, windows ahead of widgets
#[derive(Clone, Debug, Default)]
pub struct InputDispatch {
    windows: Vec<ObjectId>,
    widgets: Vec<ObjectId>,
}

impl InputDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, id: ObjectId, is_window: bool) {
        let list = if is_window { &mut self.windows } else { &mut self.widgets };
        if !list.contains(&id) {
            list.push(id);
        }
    }

    pub fn unsubscribe(&mut self, id: ObjectId) {
        self.windows.retain(|&o| o != id);
        self.widgets.retain(|&o| o != id);
    }

    pub fn is_subscribed(&self, id: ObjectId) -> bool {
        self.windows.contains(&id) || self.widgets.contains(&id)
    }

    /// Snapshot of recipients for one delivery
    ///
    /// Windows come first, lowest layer first so a root settles focus
    /// before its nested windows; widgets follow in subscription order.
    /// Ids no longer registered are dropped.
    pub fn recipients(&self, registry: &Registry, channel: Channel) -> Vec<ObjectId> {
        let wants = |id: &ObjectId| {
            registry
                .visual(*id)
                .map(|v| channel.wants(v.subscriptions()))
                .unwrap_or(false)
        };

        let mut windows: Vec<ObjectId> = self.windows.iter().copied().filter(|id| wants(id)).collect();
        windows.sort_by_key(|&id| registry.layer_of(id).unwrap_or(i32::MIN));

        windows
            .into_iter()
            .chain(self.widgets.iter().copied().filter(|id| wants(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, VisualObject, Widget};

    fn subscribed(name: &str, layer: i32, subs: Subscriptions) -> Object {
        let mut visual = VisualObject::new(name, layer);
        visual.subscriptions = subs;
        Object::widget(visual, Widget::Image)
    }

    #[test]
    fn test_windows_first_lowest_layer_first() {
        let mut reg = Registry::default();
        let pointer = Subscriptions { pointer: true, ..Subscriptions::NONE };
        let w_low = reg.add(subscribed("low", 0, pointer)).unwrap();
        let widget = reg.add(subscribed("btn", 9, pointer)).unwrap();
        let w_high = reg.add(subscribed("high", 4, pointer)).unwrap();

        let mut dispatch = InputDispatch::new();
        dispatch.subscribe(widget, false);
        dispatch.subscribe(w_low, true);
        dispatch.subscribe(w_high, true);

        assert_eq!(
            dispatch.recipients(&reg, Channel::Pointer),
            vec![w_low, w_high, widget]
        );
    }

    #[test]
    fn test_recipients_filter_channel_and_stale_ids() {
        let mut reg = Registry::default();
        let keys = Subscriptions { keys: true, ..Subscriptions::NONE };
        let a = reg.add(subscribed("a", 0, keys)).unwrap();
        let b = reg.add(subscribed("b", 0, keys)).unwrap();

        let mut dispatch = InputDispatch::new();
        dispatch.subscribe(a, false);
        dispatch.subscribe(b, false);
        reg.remove(a);

        assert_eq!(dispatch.recipients(&reg, Channel::Keys), vec![b]);
        assert!(dispatch.recipients(&reg, Channel::Pointer).is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let mut dispatch = InputDispatch::new();
        dispatch.subscribe(1, true);
        dispatch.subscribe(1, true);
        dispatch.subscribe(2, false);
        dispatch.unsubscribe(1);
        assert!(!dispatch.is_subscribed(1));
        assert!(dispatch.is_subscribed(2));
    }
}
