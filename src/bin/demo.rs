//! A short walkthrough of both containers: positional access, value
//! search, cursor-driven removal, the deque shortcuts, and a
//! splitting traversal.

use corvid::lists::{ArrayList, LinkedList};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut words = ArrayList::new();
    words.push_back("hello");
    words.push_back("my");
    words.push_back("name");
    words.push_back("is");
    words.push_back("array");

    println!("index_of(\"array\") = {:?}", words.index_of(&"array"));
    println!("get(0) = {:?}", words.get(0)?);

    words.remove(&"hello");
    println!("after remove: {:?}", words.to_vec());

    let mut chain = LinkedList::new();
    chain.push_back("hello");
    chain.push_back("my");
    chain.push_back("name");
    chain.push_back("is");
    chain.push_back("list");

    println!("index_of(\"hello\") = {:?}", chain.index_of(&"hello"));
    println!("get(1) = {:?}", chain.get(1)?);

    chain.remove(&"list");
    chain.remove_at(1)?;
    println!("after removals: {:?}", chain);

    // cursor-driven removal of everything shorter than 3 chars
    let mut cur = chain.cursor();
    while let Some(&word) = cur.next(&chain)? {
        if word.len() < 3 {
            cur.remove(&mut chain)?;
        }
    }
    println!("after cursor pass: {:?}", chain);

    // deque shortcuts
    let mut queue = LinkedList::new();
    queue.offer(1);
    queue.offer(2);
    queue.offer(3);
    println!("peek = {:?}", queue.peek());
    while let Some(head) = queue.poll() {
        println!("polled {}", head);
    }

    // splitting traversal over a larger list
    let numbers: LinkedList<u32> = (0..5000).collect();
    let mut sp = numbers.splitter();
    let mut total: u64 = 0;
    let mut batches = 0;
    while let Some(batch) = sp.try_split(&numbers)? {
        batches += 1;
        total += batch.map(|&e| u64::from(e)).sum::<u64>();
    }
    sp.for_each_remaining(&numbers, |&e| total += u64::from(e))?;
    println!("{} batches, total {}", batches, total);

    Ok(())
}
