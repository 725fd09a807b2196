use std::io::{self, Write};

use fwdlist::ForwardList;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut list = ForwardList::try_from_slice(&[1, 2, 3])?;
    list.dump(&mut out)?;

    list.try_push_front(0)?;
    list.dump(&mut out)?;

    list.pop_front();
    list.pop_front();
    list.dump(&mut out)?;

    let mut copy = list.try_clone()?;
    copy.try_push_front(9)?;
    list.dump(&mut out)?;
    copy.dump(&mut out)?;

    if let Err(err) = list.before_begin().get(&list) {
        writeln!(out, "before_begin: {}", err)?;
    }
    if let Err(err) = list.end().get(&list) {
        writeln!(out, "end: {}", err)?;
    }

    #[cfg(feature = "search")]
    {
        for (text, pattern) in [("abxabcabcaby", "abcaby"), ("aaaa", "ab")] {
            let found = fwdlist::search::contains(text, pattern);
            writeln!(out, "search({:?}, {:?}) = {}", text, pattern, found)?;
        }
    }

    Ok(())
}
