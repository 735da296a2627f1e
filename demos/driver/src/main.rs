use stack::{BoundedStack, Error, Predicate, Transformer, transform};

#[derive(Copy, Clone, Debug, Default)]
pub struct IsEven;

#[derive(Copy, Clone, Debug, Default)]
pub struct Square;

impl Predicate<i32> for IsEven {
    fn test(&mut self, value: &i32) -> bool {
        value % 2 == 0
    }
}

impl Transformer<i32> for Square {
    fn apply(&mut self, value: &i32) -> i32 {
        value * value
    }
}

fn fundamentals() -> anyhow::Result<()> {
    println!("**** fundamental operations ****");

    let mut s1 = BoundedStack::with_capacity(5);
    for value in 1..=4 {
        s1.push(value)?;
    }
    s1.pop()?;

    println!("initial stack:");
    s1.print();

    let s2 = s1.clone();
    println!("copy:");
    s2.print();

    let mut s3 = BoundedStack::with_capacity(5);
    s3.assign(&s1)?;
    println!("assigned:");
    s3.print();

    s1.clear();
    println!("cleared:");
    s1.print();
    Ok(())
}

fn usage() -> anyhow::Result<()> {
    println!("**** usage ****");

    let mut s1 = BoundedStack::<i32>::from_range([10, 20, 30, 40, 50])?;
    println!("built from a range:");
    s1.print();
    println!("size: {}", s1.size());

    s1.clear();
    match s1.pop() {
        Err(error @ Error::EmptyAccess) => println!("caught: {error}"),
        other => anyhow::bail!("expected an underflow, got {other:?}"),
    }

    let mut s2 = BoundedStack::with_capacity(2);
    s2.push(1)?;
    s2.push(2)?;
    match s2.push(3) {
        Err(error @ Error::CapacityExceeded { .. }) => println!("caught: {error}"),
        other => anyhow::bail!("expected an overflow, got {other:?}"),
    }

    Ok(())
}

fn filter_and_transform() -> anyhow::Result<()> {
    println!("**** filter_out and transform ****");

    let mut s1 = BoundedStack::<i32>::with_capacity(5);
    s1.load_from_range(1..=5)?;
    println!("initial stack:");
    s1.print();

    let filtered = s1.filter_out(IsEven);
    println!("even numbers:");
    filtered.print();

    transform(&mut s1, Square);
    println!("squared:");
    s1.print();
    Ok(())
}

fn iteration() -> anyhow::Result<()> {
    println!("**** iteration ****");

    let mut s1 = BoundedStack::with_capacity(5);
    s1.push(10)?;
    s1.push(20)?;
    s1.push(30)?;

    let end = s1.end();
    let mut it = s1.begin();
    while it != end {
        if let Some(value) = it.next() {
            print!("{value} ");
        }
    }
    println!();
    Ok(())
}

fn loading() -> anyhow::Result<()> {
    println!("**** load_from_range ****");

    let mut s1 = BoundedStack::<i32>::with_capacity(5);
    s1.push(3)?;

    s1.load_from_range(vec![10, 20, 30])?;
    println!("after loading a range that fits:");
    s1.print();

    if let Err(error) = s1.load_from_range(vec![1, 2, 3, 4, 5, 6]) {
        println!("caught: {error}");
    }

    s1.load_from_range(Vec::<i32>::new())?;
    println!("after loading an empty range:");
    s1.print();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    fundamentals()?;
    usage()?;
    filter_and_transform()?;
    iteration()?;
    loading()?;
    Ok(())
}
