use crate::config::{MalformedLinePolicy, MiningConfig};
use crate::error::MiningError;
use crate::mining::mine;
use crate::sink::{ResultSink, TextSink, format_itemset, write_results};
use crate::source::{DataSource, TextSource, parse_transaction_line};
use crate::store::TransactionStore;
use ndarray::Array2;

const DATA: &str = "3 1 2 3\n2 1 2\n2 1 3\n2 2 3\n";

#[test]
fn test_parse_line() {
    assert_eq!(parse_transaction_line("3 1 2 5", 1).unwrap(), Some(vec![1, 2, 5]));
    assert_eq!(parse_transaction_line("  2\t7  9 \r\n", 1).unwrap(), Some(vec![7, 9]));
    // The count token is informational only
    assert_eq!(parse_transaction_line("5 1 2", 1).unwrap(), Some(vec![1, 2]));
    assert_eq!(parse_transaction_line("0", 1).unwrap(), Some(vec![]));
    assert_eq!(parse_transaction_line("   \n", 1).unwrap(), None);
}

#[test]
fn test_parse_line_rejects_bad_tokens() {
    let err = parse_transaction_line("2 1 x", 7).unwrap_err();
    match err {
        MiningError::Parse { line, token, .. } => {
            assert_eq!(line, 7);
            assert_eq!(token, "x");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(parse_transaction_line("two 1 2", 1).is_err());
    assert!(parse_transaction_line("2 1 -4", 1).is_err());
}

#[test]
fn test_text_source_reads_all_lines() {
    let mut source = TextSource::new(DATA.as_bytes(), MalformedLinePolicy::Abort);
    let mut transactions = Vec::new();
    while let Some(transaction) = source.next_transaction().unwrap() {
        transactions.push(transaction);
    }

    assert_eq!(transactions, vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]]);
}

#[test]
fn test_malformed_line_aborts_by_default() {
    let data = "2 1 2\n\n2 1 oops\n2 1 2\n";
    let source = TextSource::new(data.as_bytes(), MalformedLinePolicy::Abort);

    let err = TransactionStore::load(source).unwrap_err();
    assert!(matches!(err, MiningError::Parse { line: 3, .. }));
}

#[test]
fn test_malformed_line_skipped_on_request() {
    let data = "2 1 2\n\n2 1 oops\n2 1 2\n";
    let mut source = TextSource::new(data.as_bytes(), MalformedLinePolicy::Skip);

    let store = TransactionStore::load(&mut source).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.postings(1), &[0, 1]);
    assert_eq!(source.skipped_lines(), 1);
}

#[test]
fn test_invalid_utf8_line_aborts_by_default() {
    let data: &[u8] = b"2 1 2\n2 1 \xff\n2 1 2\n";
    let source = TextSource::new(data, MalformedLinePolicy::Abort);

    let err = TransactionStore::load(source).unwrap_err();
    assert!(matches!(err, MiningError::Parse { line: 2, .. }));
}

#[test]
fn test_invalid_utf8_line_skipped_on_request() {
    let data: &[u8] = b"2 1 2\n2 1 \xff\n2 1 2\n";
    let mut source = TextSource::new(data, MalformedLinePolicy::Skip);

    let store = TransactionStore::load(&mut source).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.transaction(1), &[1, 2]);
    assert_eq!(source.skipped_lines(), 1);
}

#[test]
fn test_missing_input_is_io_error() {
    let err = TextSource::open("/nonexistent/apriori/Data.txt", MalformedLinePolicy::Abort)
        .err()
        .unwrap();
    assert!(matches!(err, MiningError::Io { .. }));
}

#[test]
fn test_text_sink_propagates_writer_errors() {
    struct FailingWriter;

    impl std::io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    let store = super::store_of(&[&[1, 2], &[1, 2]]);
    let outcome = crate::apriori_algorithm(&store, &MiningConfig::new(2)).unwrap();

    // Buffered lines may only fail once flushed in `finish`
    let mut sink = TextSink::new(FailingWriter);
    let err = write_results(&outcome.itemsets, &mut sink).unwrap_err();
    assert!(matches!(err, MiningError::Io { .. }));
}

#[test]
fn test_format_itemset() {
    assert_eq!(format_itemset(&[1, 2, 5], 3), "[1 2 5] 3");
    assert_eq!(format_itemset(&[42], 10), "[42] 10");
}

#[test]
fn test_text_round_trip() {
    let config = MiningConfig::new(2);
    let outcome = mine(TextSource::new(DATA.as_bytes(), config.malformed_lines), &config).unwrap();

    let mut sink = TextSink::new(Vec::new());
    write_results(&outcome.itemsets, &mut sink).unwrap();
    assert_eq!(sink.written(), 6);

    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(output, "[1] 3\n[2] 3\n[3] 3\n[1 2] 2\n[1 3] 2\n[2 3] 2\n");
}

#[test]
fn test_mine_rejects_config_before_reading() {
    struct Unreadable;

    impl DataSource for Unreadable {
        fn next_transaction(&mut self) -> crate::Result<Option<Vec<usize>>> {
            panic!("source must not be read with an invalid configuration");
        }
    }

    let err = mine(Unreadable, &MiningConfig::new(0)).unwrap_err();
    assert!(matches!(err, MiningError::Configuration { .. }));
}

#[test]
fn test_vec_sink() {
    let store = super::store_of(&[&[4, 8], &[4, 8], &[8]]);
    let outcome = crate::apriori_algorithm(&store, &MiningConfig::new(2)).unwrap();

    let mut sink: Vec<(Vec<usize>, usize)> = Vec::new();
    write_results(&outcome.itemsets, &mut sink).unwrap();
    sink.finish().unwrap();
    assert_eq!(sink, vec![(vec![4], 2), (vec![8], 3), (vec![4, 8], 2)]);
}

#[test]
fn test_matrix_source() {
    let matrix = Array2::from_shape_vec(
        (4, 3),
        vec![
            1, 1, 0, // Transaction 0: items 0, 1
            1, 1, 1, // Transaction 1: items 0, 1, 2
            1, 0, 1, // Transaction 2: items 0, 2
            0, 1, 1, // Transaction 3: items 1, 2
        ],
    )
    .unwrap();

    let store = TransactionStore::from_matrix(matrix.view()).unwrap();
    assert_eq!(store.len(), 4);
    assert_eq!(store.transaction(1), &[0, 1, 2]);
    assert_eq!(store.postings(2), &[1, 2, 3]);

    let outcome = crate::apriori_algorithm(&store, &MiningConfig::new(2)).unwrap();
    assert_eq!(outcome.itemsets.len(), 6);
}

#[test]
fn test_matrix_source_rejects_non_binary() {
    let matrix = Array2::from_shape_vec((1, 2), vec![1, 3]).unwrap();
    let err = TransactionStore::from_matrix(matrix.view()).unwrap_err();

    assert!(matches!(err, MiningError::InvalidMatrix { .. }));
}
