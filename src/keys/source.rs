//! Producers of key presses.

use super::KeyCode;

/// Something that hands out key presses one at a time.
///
/// Returns `None` once no more keys will arrive.
pub trait KeySource {
    fn next_key(&mut self) -> Option<KeyCode>;
}

impl<S: KeySource + ?Sized> KeySource for Box<S> {
    fn next_key(&mut self) -> Option<KeyCode> {
        (**self).next_key()
    }
}

/// Keys delivered over a channel, typically from an input thread.
impl KeySource for flume::Receiver<KeyCode> {
    fn next_key(&mut self) -> Option<KeyCode> {
        self.recv().ok()
    }
}

/// A fixed sequence of keys, e.g. a parsed key script.
pub struct ScriptSource<I> {
    keys: I,
}

impl<I: Iterator<Item = KeyCode>> ScriptSource<I> {
    pub fn new(keys: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            keys: keys.into_iter(),
        }
    }
}

impl<I: Iterator<Item = KeyCode>> KeySource for ScriptSource<I> {
    fn next_key(&mut self) -> Option<KeyCode> {
        self.keys.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_script_source_drains() {
        let mut source = ScriptSource::new(vec![KeyCode::Digit(1), KeyCode::Equals]);
        assert_eq!(source.next_key(), Some(KeyCode::Digit(1)));
        assert_eq!(source.next_key(), Some(KeyCode::Equals));
        assert_eq!(source.next_key(), None);
    }

    #[test]
    fn test_channel_source_ends_when_sender_drops() {
        let (tx, mut rx) = flume::unbounded();
        let producer = thread::spawn(move || {
            for d in 0..3 {
                tx.send(KeyCode::Digit(d)).unwrap();
            }
        });

        let mut received = Vec::new();
        while let Some(key) = rx.next_key() {
            received.push(key);
        }
        producer.join().unwrap();

        assert_eq!(
            received,
            vec![KeyCode::Digit(0), KeyCode::Digit(1), KeyCode::Digit(2)]
        );
    }
}
