//! Numbered menu loop over a [`CollectionStore`].
//!
//! Each action maps to one store operation. Store errors are printed and the
//! loop continues; only console I/O failures end it early.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::Value;

use shopkeep_core::{RawFields, Record};
use shopkeep_store::{CollectionStore, LoadReport};

use crate::books::{Book, VariantForm};
use crate::prompt::Console;

#[derive(Debug, Clone, Copy)]
enum Action {
    Add(&'static VariantForm),
    List,
    Replace,
    UpdateField,
    RemoveAt,
    RemoveByName,
    Save,
    Load,
    Exit,
}

fn actions<R>(book: &Book<R>) -> Vec<(String, Action)> {
    let mut actions: Vec<(String, Action)> = book
        .variants
        .iter()
        .map(|form| (format!("Add {}", form.label), Action::Add(form)))
        .collect();

    actions.push((format!("List {}", book.plural), Action::List));
    actions.push(("Replace by index".to_string(), Action::Replace));
    actions.push(("Update one field by index".to_string(), Action::UpdateField));
    actions.push(("Delete by index".to_string(), Action::RemoveAt));
    if book.name_of.is_some() {
        actions.push(("Delete by name".to_string(), Action::RemoveByName));
    }
    actions.push(("Save to JSON file".to_string(), Action::Save));
    actions.push(("Load from JSON file".to_string(), Action::Load));
    actions.push(("Exit".to_string(), Action::Exit));
    actions
}

/// Run the menu until the user exits or input ends.
pub fn run<R, I, O>(
    book: &Book<R>,
    store: &mut CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<()>
where
    R: Record,
    I: BufRead,
    O: Write,
{
    let actions = actions(book);

    loop {
        console.say(format!("\n##### {} #####", book.title))?;
        for (n, (label, _)) in actions.iter().enumerate() {
            console.say(format!("{}. {label}", n + 1))?;
        }

        let Some(choice) = console.ask("Choose an option")? else {
            return Ok(());
        };
        let action = choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| actions.get(n))
            .map(|(_, action)| *action);

        let Some(action) = action else {
            console.say("Invalid option, please try again.")?;
            continue;
        };

        let keep_going = match action {
            Action::Add(form) => add(book, store, console, form)?,
            Action::List => list(book, store, console)?,
            Action::Replace => replace(book, store, console)?,
            Action::UpdateField => update_field(store, console)?,
            Action::RemoveAt => remove_at(store, console)?,
            Action::RemoveByName => remove_by_name(book, store, console)?,
            Action::Save => save(store, console)?,
            Action::Load => load(book, store, console)?,
            Action::Exit => {
                console.say("Goodbye.")?;
                false
            }
        };

        if !keep_going {
            return Ok(());
        }
    }
}

/// Print a load outcome, including every skipped element.
pub fn report_load<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    plural: &str,
    report: &LoadReport,
) -> io::Result<()> {
    console.say(format!("Loaded {} {plural}.", report.loaded))?;
    if !report.is_clean() {
        console.say(format!("Skipped {} entries:", report.skipped.len()))?;
        for skipped in &report.skipped {
            console.say(format!("  entry {}: {}", skipped.position, skipped.error))?;
        }
    }
    Ok(())
}

/// Ask every prompt of `form`. `None` when input ends mid-form.
fn fill_form<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    form: &VariantForm,
) -> io::Result<Option<RawFields>> {
    let mut fields = RawFields::new();
    for (name, question) in form.prompts {
        let Some(answer) = console.ask(question)? else {
            return Ok(None);
        };
        fields.insert(name.to_string(), answer);
    }
    Ok(Some(fields))
}

/// Ask for a form and build a record from it.
///
/// `None` when input ends; `Some(None)` when the answers were rejected (already reported).
fn read_record<R: Record, I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    form: &VariantForm,
) -> io::Result<Option<Option<R>>> {
    let Some(fields) = fill_form(console, form)? else {
        return Ok(None);
    };
    match R::create(form.tag, &fields) {
        Ok(record) => Ok(Some(Some(record))),
        Err(err) => {
            console.say(format!("Error: {err}"))?;
            Ok(Some(None))
        }
    }
}

/// `None` when input ends; `Some(None)` when the answer is not an index (already reported).
fn ask_index<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    question: &str,
) -> io::Result<Option<Option<usize>>> {
    let Some(raw) = console.ask(question)? else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(index) => Ok(Some(Some(index))),
        Err(_) => {
            console.say(format!("Error: {raw:?} is not a valid index."))?;
            Ok(Some(None))
        }
    }
}

fn add<R: Record, I: BufRead, O: Write>(
    book: &Book<R>,
    store: &mut CollectionStore<R>,
    console: &mut Console<I, O>,
    form: &VariantForm,
) -> io::Result<bool> {
    let Some(record) = read_record::<R, _, _>(console, form)? else {
        return Ok(false);
    };
    if let Some(record) = record {
        match store.add(record) {
            Ok(index) => console.say(format!("Added {} at index {index}.", form.label))?,
            Err(err) => console.say(format!(
                "Added {} to {}, but saving failed: {err}",
                form.label, book.plural
            ))?,
        }
    }
    Ok(true)
}

fn list<R: Record, I: BufRead, O: Write>(
    book: &Book<R>,
    store: &CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<bool> {
    let documents = store.list();
    if documents.is_empty() {
        console.say(format!("No {} recorded.", book.plural))?;
    }
    for (index, doc) in documents.into_iter().enumerate() {
        console.say(format!("{index}: {}", Value::Object(doc)))?;
    }
    Ok(true)
}

fn replace<R: Record, I: BufRead, O: Write>(
    book: &Book<R>,
    store: &mut CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<bool> {
    let Some(index) = ask_index(console, "Index to replace")? else {
        return Ok(false);
    };
    let Some(index) = index else {
        return Ok(true);
    };

    let labels: Vec<&str> = book.variants.iter().map(|f| f.label).collect();
    let Some(kind) = console.ask(&format!("Kind ({})", labels.join(" / ")))? else {
        return Ok(false);
    };
    let Some(form) = book
        .variants
        .iter()
        .find(|f| f.label.eq_ignore_ascii_case(kind.trim()) || f.tag == kind.trim())
    else {
        console.say(format!("Error: unknown kind {kind:?}."))?;
        return Ok(true);
    };

    let Some(record) = read_record::<R, _, _>(console, form)? else {
        return Ok(false);
    };
    if let Some(record) = record {
        match store.replace_at(index, record) {
            Ok(_) => console.say(format!("Replaced index {index}."))?,
            Err(err) => console.say(format!("Error: {err}"))?,
        }
    }
    Ok(true)
}

fn update_field<R: Record, I: BufRead, O: Write>(
    store: &mut CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<bool> {
    let Some(index) = ask_index(console, "Index to update")? else {
        return Ok(false);
    };
    let Some(index) = index else {
        return Ok(true);
    };

    let question = match store.get(index) {
        Some(record) => format!("Field ({})", record.field_names().join(", ")),
        None => "Field".to_string(),
    };
    let Some(name) = console.ask(&question)? else {
        return Ok(false);
    };
    let Some(value) = console.ask("New value")? else {
        return Ok(false);
    };

    match store.update_field(index, name.trim(), &value) {
        Ok(()) => console.say(format!("Updated `{}` at index {index}.", name.trim()))?,
        Err(err) => console.say(format!("Error: {err}"))?,
    }
    Ok(true)
}

fn remove_at<R: Record, I: BufRead, O: Write>(
    store: &mut CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<bool> {
    let Some(index) = ask_index(console, "Index to delete")? else {
        return Ok(false);
    };
    if let Some(index) = index {
        match store.remove_at(index) {
            Ok(_) => console.say(format!("Deleted index {index}."))?,
            Err(err) => console.say(format!("Error: {err}"))?,
        }
    }
    Ok(true)
}

fn remove_by_name<R: Record, I: BufRead, O: Write>(
    book: &Book<R>,
    store: &mut CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<bool> {
    let Some(name_of) = book.name_of else {
        return Ok(true);
    };
    let Some(name) = console.ask("Name to delete")? else {
        return Ok(false);
    };

    let name = name.trim();
    match store.remove_where(|r| name_of(r) == name) {
        Ok(0) => console.say(format!("No {} named {name:?}.", book.plural))?,
        Ok(n) => console.say(format!("Deleted {n} {} named {name:?}.", book.plural))?,
        Err(err) => console.say(format!("Deleted, but saving failed: {err}"))?,
    }
    Ok(true)
}

fn save<R: Record, I: BufRead, O: Write>(
    store: &CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<bool> {
    let Some(path) = ask_path(store, console)? else {
        return Ok(false);
    };
    match store.save(Path::new(&path)) {
        Ok(()) => console.say(format!("Saved {} records to {path}.", store.len()))?,
        Err(err) => console.say(format!("Error: {err}"))?,
    }
    Ok(true)
}

fn load<R: Record, I: BufRead, O: Write>(
    book: &Book<R>,
    store: &mut CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<bool> {
    let Some(path) = ask_path(store, console)? else {
        return Ok(false);
    };
    match store.load(Path::new(&path)) {
        Ok(report) => report_load(console, book.plural, &report)?,
        Err(err) => console.say(format!("Error: {err}"))?,
    }
    Ok(true)
}

/// Ask for a file path; an empty answer picks the store's bound file when there is one.
fn ask_path<R: Record, I: BufRead, O: Write>(
    store: &CollectionStore<R>,
    console: &mut Console<I, O>,
) -> io::Result<Option<String>> {
    let bound = store
        .config()
        .path
        .as_ref()
        .map(|p| p.display().to_string());
    let question = match &bound {
        Some(p) => format!("JSON file name [{p}]"),
        None => "JSON file name".to_string(),
    };

    let Some(answer) = console.ask(&question)? else {
        return Ok(None);
    };
    let answer = answer.trim().to_string();
    Ok(Some(match (answer.is_empty(), bound) {
        (true, Some(p)) => p,
        _ => answer,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::{inventory_book, sales_book};

    #[test]
    fn inventory_menu_offers_delete_by_name() {
        let labels: Vec<String> = actions(&inventory_book()).into_iter().map(|(l, _)| l).collect();
        assert!(labels.contains(&"Delete by name".to_string()));
        assert_eq!(labels.first().map(String::as_str), Some("Add electronic item"));
        assert_eq!(labels.last().map(String::as_str), Some("Exit"));
    }

    #[test]
    fn sales_menu_has_no_name_deletion() {
        let labels: Vec<String> = actions(&sales_book()).into_iter().map(|(l, _)| l).collect();
        assert!(!labels.contains(&"Delete by name".to_string()));
        assert_eq!(labels.len(), 9);
    }
}
