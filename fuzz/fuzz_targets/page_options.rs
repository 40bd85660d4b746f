#![no_main]

use clap::Parser;
use libfuzzer_sys::fuzz_target;

fn take_numeric_string(data: &[u8], cursor: &mut usize, max_len: usize) -> String {
    if *cursor >= data.len() {
        return String::new();
    }
    let len = usize::from(data[*cursor]) % (max_len.saturating_add(1));
    *cursor = cursor.saturating_add(1);
    let end = (*cursor).saturating_add(len).min(data.len());
    let slice = &data[*cursor..end];
    *cursor = end;

    let mut out = String::with_capacity(slice.len());
    for &byte in slice {
        let ch = match byte % 13 {
            0..=9 => char::from(b'0' + (byte % 10)),
            10 => '-',
            11 => '+',
            _ => ' ',
        };
        out.push(ch);
    }
    out
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut cursor = 0usize;
    let page = take_numeric_string(data, &mut cursor, 24);
    let page_size = take_numeric_string(data, &mut cursor, 24);

    let argv = [
        "apiprobe".to_owned(),
        "products".to_owned(),
        format!("--page={}", page),
        format!("--page-size={}", page_size),
    ];
    let parsed = apiprobe::args::ProbeArgs::try_parse_from(argv.iter().map(String::as_str));
    let expected_page = apiprobe::fuzzing::parse_positive_u64_input(&page).ok();
    let expected_size = apiprobe::fuzzing::parse_positive_u64_input(&page_size).ok();

    match (parsed, expected_page, expected_size) {
        (Ok(args), Some(page), Some(page_size)) => {
            let products = args.products();
            assert!(products.is_some());
            if let Some(products) = products {
                assert_eq!(products.page.get(), page);
                assert_eq!(products.page_size.get(), page_size);
                assert!(page >= 1 && page_size >= 1);
            }
        }
        (Ok(_), _, _) => panic!("accepted page options {:?} / {:?}", page, page_size),
        (Err(_), Some(_), Some(_)) => panic!("rejected page options {:?} / {:?}", page, page_size),
        (Err(_), _, _) => {}
    }
});
